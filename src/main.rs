//! Headless demo dig
//!
//! Runs a scripted session against a sample site spec: detector sweep, rough
//! shovel work around the find, then a careful brush finish. Prints the
//! narrative events and an ASCII depth map at the end. Useful as an
//! end-to-end smoke test of the whole crate without a browser.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is a library; the host page drives the engine.
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use digsite::engine::{DigEngine, Phase};
    use digsite::tools::ToolKind;
    use digsite::{DigConfig, SiteSpec};

    const SURFACE_W: u32 = 640;
    const SURFACE_H: u32 = 1136;

    const SITE_JSON: &str = r##"{
        "biome": "grass",
        "dirtMaterials": ["soil", "gravel"],
        "borderColor": "#4A7023",
        "artifact": {
            "position": { "x": 50, "y": 50 },
            "depth": 50,
            "width": 25,
            "height": 15
        },
        "trashCount": 2,
        "seed": 20260806
    }"##;

    pub fn run() {
        env_logger::init();

        let site: SiteSpec = serde_json::from_str(SITE_JSON).expect("demo site spec parses");
        let mut engine = DigEngine::new(SURFACE_W, SURFACE_H, site, DigConfig::default())
            .expect("engine construction");

        let events: Rc<RefCell<Vec<String>>> = Rc::default();
        hook_callbacks(&mut engine, &events);

        engine.set_phase(Phase::Playing);
        engine.start();

        // --- 1. detector sweep ---------------------------------------------
        engine.select_tool(Some(ToolKind::Detector));
        let vp = engine.viewport();
        let (gw, gh) = (vp.grid_w as i32, vp.grid_h as i32);
        for (gx, gy) in [(2, 2), (gw - 3, 2), (2, gh - 3), (gw - 3, gh - 3), (gw / 2, gh / 2)] {
            let p = vp.to_screen(gx, gy);
            engine.pointer_down(p.x, p.y);
            step(&mut engine, 8);
        }

        // --- 2. rough shovel work away from the find -----------------------
        engine.select_tool(Some(ToolKind::Shovel));
        let fp = engine.artifact().footprint;
        for gy in (2..gh - 2).step_by(5) {
            for gx in (2..gw - 2).step_by(5) {
                // Leave a generous margin around the footprint; the shovel
                // disc spills a few cells.
                let margin = 5;
                if gx >= fp.x - margin
                    && gx < fp.right() + margin
                    && gy >= fp.y - margin
                    && gy < fp.bottom() + margin
                {
                    continue;
                }
                let p = vp.to_screen(gx, gy);
                engine.pointer_down(p.x, p.y);
                // Step past the cooldown so the next strike lands.
                step(&mut engine, 20);
            }
        }
        assert!(!engine.is_damaged(), "careful digging should not damage");

        // --- 3. careful brush finish over the footprint --------------------
        engine.select_tool(Some(ToolKind::Brush));
        for _round in 0..12 {
            for gy in fp.y..fp.bottom() {
                for gx in fp.x..fp.right() {
                    let p = vp.to_screen(gx, gy);
                    engine.pointer_down(p.x, p.y);
                    engine.pointer_move(p.x, p.y);
                    engine.pointer_up(p.x, p.y);
                }
            }
            step(&mut engine, 4);
            if engine.uncovered_percentage() >= 100.0 {
                break;
            }
        }

        // Also brush out the first trash item, if one was placed.
        if let Some(item) = engine.trash().first().copied() {
            let t = item.footprint;
            for _round in 0..12 {
                for gy in t.y..t.bottom() {
                    for gx in t.x..t.right() {
                        let p = vp.to_screen(gx, gy);
                        engine.pointer_down(p.x, p.y);
                        engine.pointer_move(p.x, p.y);
                        engine.pointer_up(p.x, p.y);
                    }
                }
                step(&mut engine, 4);
            }
        }

        let cues = engine.drain_audio();

        println!("== dig complete ==");
        println!("uncovered: {:.1}%", engine.uncovered_percentage());
        println!("damaged: {}  broken: {}", engine.is_damaged(), engine.is_broken());
        println!("sound cues this frame batch: {}", cues.len());
        println!();
        println!("events:");
        for line in events.borrow().iter() {
            println!("  {line}");
        }
        println!();
        print_depth_map(&engine);

        engine.stop();
    }

    fn hook_callbacks(engine: &mut DigEngine, events: &Rc<RefCell<Vec<String>>>) {
        let e = Rc::clone(events);
        engine.on_revealed70(move || e.borrow_mut().push("70% revealed".into()));
        let e = Rc::clone(events);
        engine.on_revealed95(move || e.borrow_mut().push("95% revealed - discovery!".into()));
        let e = Rc::clone(events);
        engine.on_artifact_damage(move |level| {
            e.borrow_mut().push(format!("artifact damaged (level {level})"))
        });
        let e = Rc::clone(events);
        engine.on_artifact_break(move || e.borrow_mut().push("artifact BROKEN".into()));
        let e = Rc::clone(events);
        engine.on_trash_revealed(move |index, _x, _y, msg| {
            e.borrow_mut().push(format!("trash #{index}: {msg}"))
        });
    }

    fn step(engine: &mut DigEngine, frames: u32) {
        for _ in 0..frames {
            engine.tick(16.7);
        }
    }

    fn print_depth_map(engine: &DigEngine) {
        let grid = engine.grid();
        let artifact = engine.artifact();
        let hitbox = artifact.hitbox();
        println!("depth map ({}x{}):", grid.width(), grid.height());
        for y in 0..grid.height() as i32 {
            let row: String = (0..grid.width() as i32)
                .map(|x| {
                    let depth = grid.depth(x, y).unwrap_or(0);
                    if depth <= artifact.burial_depth && hitbox.contains_cell(x, y) {
                        'A'
                    } else {
                        match depth {
                            0 => ' ',
                            1..=15 => '.',
                            16..=30 => '-',
                            31..=45 => '+',
                            _ => '#',
                        }
                    }
                })
                .collect();
            println!("  {row}");
        }
    }
}

use box2d_lite_kit::dynamics::BodyType;
use box2d_lite_kit::geometry::RegularShape;
use box2d_lite_kit::math::{Vec2, random_range};
use box2d_lite_kit::render::{AssetScope, TextureFilter};
use box2d_lite_kit::{ActorHandle, Scene, SceneConfig};
use macroquad::prelude::*;
use ::rand::thread_rng;
use tracing::{info, warn};

const SHAPE_KEYS: [(KeyCode, RegularShape); 6] = [
    (KeyCode::Key3, RegularShape::Triangle),
    (KeyCode::Key4, RegularShape::Square),
    (KeyCode::Key5, RegularShape::Pentagon),
    (KeyCode::Key6, RegularShape::Hexagon),
    (KeyCode::Key7, RegularShape::Heptagon),
    (KeyCode::Key8, RegularShape::Octagon),
];

fn build_arena(scene: &mut Scene) {
    scene.clear();
    let w = scene.config().screen_width;
    let h = scene.config().screen_height;
    scene.new_box(BodyType::Static, 0.0, 0.0, w, 20.0);
    scene.new_box(BodyType::Static, 0.0, 20.0, 20.0, h - 20.0);
    scene.new_box(BodyType::Static, w - 20.0, 20.0, 20.0, h - 20.0);
}

fn mouse_in_pixels(scene: &Scene) -> Vec2 {
    let (x, y) = mouse_position();
    scene.camera().screen_to_pixels(Vec2::new(x, y))
}

#[macroquad::main("box2d-lite-kit sandbox")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,box2d_lite_kit=debug".into()),
        )
        .init();

    let config = SceneConfig {
        screen_width: screen_width(),
        screen_height: screen_height(),
        debug: true,
        ..Default::default()
    };
    let mut scene = match Scene::new(config) {
        Ok(scene) => scene,
        Err(e) => {
            warn!("cannot create scene: {e}");
            return;
        }
    };
    build_arena(&mut scene);

    let mut rng = thread_rng();
    let mut spawned: Vec<ActorHandle> = Vec::new();
    let mut paused = false;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        if (screen_width(), screen_height())
            != (scene.config().screen_width, scene.config().screen_height)
        {
            scene.set_screen_size(screen_width(), screen_height());
        }

        let at = mouse_in_pixels(&scene);

        if is_key_pressed(KeyCode::B) {
            let r = random_range(&mut rng, 10.0, 30.0);
            spawned.push(scene.new_ball(BodyType::Dynamic, at.x, at.y, r));
        }
        if is_key_pressed(KeyCode::X) {
            let w = random_range(&mut rng, 20.0, 80.0);
            let h = random_range(&mut rng, 20.0, 80.0);
            spawned.push(scene.new_box(BodyType::Dynamic, at.x - w / 2.0, at.y - h / 2.0, w, h));
        }
        for (key, shape) in SHAPE_KEYS {
            if is_key_pressed(key) {
                let r = random_range(&mut rng, 15.0, 40.0);
                match scene.new_regular_polygon(shape, BodyType::Dynamic, at.x, at.y, r) {
                    Ok(h) => spawned.push(h),
                    Err(e) => warn!("{shape}: {e}"),
                }
            }
        }

        // Merge everything spawned since the last merge into one body.
        if is_key_pressed(KeyCode::C) {
            match scene.combine(BodyType::Dynamic, &spawned) {
                Ok(h) => spawned = vec![h],
                Err(e) => warn!("combine failed: {e}"),
            }
        }
        if is_key_pressed(KeyCode::D) {
            if let Some(h) = spawned.pop() {
                scene.destroy(h);
            }
        }
        if is_key_pressed(KeyCode::V) {
            if let Some(&h) = spawned.last() {
                if let Some(mut editor) = scene.edit(h) {
                    editor.constant_velocity(Vec2::new(150.0, 0.0));
                }
            }
        }
        if is_key_pressed(KeyCode::T) {
            match scene
                .load_texture(AssetScope::Internal, "crate.png", TextureFilter::Linear)
                .await
            {
                Ok(texture) => {
                    if let Some(&h) = spawned.last() {
                        if let Some(mut editor) = scene.edit(h) {
                            editor.texture(texture);
                        }
                    }
                }
                Err(e) => warn!("{e}"),
            }
        }
        if is_key_pressed(KeyCode::G) {
            let debug = !scene.debug();
            scene.set_debug(debug);
        }
        if is_key_pressed(KeyCode::Equal) {
            let size = scene.meter_size() * 1.25;
            if let Err(e) = scene.set_meter_size(size) {
                warn!("{e}");
            }
        }
        if is_key_pressed(KeyCode::Minus) {
            let size = scene.meter_size() * 0.8;
            if let Err(e) = scene.set_meter_size(size) {
                warn!("{e}");
            }
        }
        if is_key_pressed(KeyCode::R) {
            spawned.clear();
            build_arena(&mut scene);
            info!("arena reset");
        }
        if is_key_pressed(KeyCode::K) {
            paused = !paused;
        }

        if !paused || is_key_pressed(KeyCode::N) {
            scene.update(get_frame_time().min(1.0 / 30.0));
        }

        clear_background(BLACK);
        scene.draw();

        let overlay = format!(
            "B ball | X box | 3-8 polygons | C combine | D destroy | V push | T texture\nG debug | +/- meter size | K pause | N step | R reset\nmeter={:.0}px actors={} contacts={} debug={}",
            scene.meter_size(),
            scene.len(),
            scene.world().arbiters.len(),
            scene.debug(),
        );
        draw_text(&overlay, 12.0, 20.0, 18.0, WHITE);

        next_frame().await;
    }
}

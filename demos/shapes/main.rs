//! Animated showcase of every built-in shape.
//!
//! ```text
//! cargo run --example shapes [IMAGE_DIR]
//! ```
//!
//! With an image directory, shapes pick up the textures named below when the
//! files exist. Arrow keys or a left drag pan the view, the wheel moves in and
//! out, Escape quits.

use std::path::{Path, PathBuf};

use lathekit::prelude::*;

const COLOR: u32 = 0xff00_ffff;

fn textured(shape: Shape, dir: Option<&Path>, file: &str) -> Shape {
    match dir.map(|d| d.join(file)) {
        Some(path) if path.is_file() => shape.with_texture(path),
        Some(path) => {
            log::info!("{} not found, drawing '{}' untextured", path.display(), shape.name);
            shape
        }
        None => shape,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let image_dir: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);
    let dir = image_dir.as_deref();

    let mut app = ShapesApp::new(AppConfig::default().with_title("lathekit shapes"));

    let shapes = [
        (Shape::new("cube1", ShapeType::Cuboid, 3.0, 3.0, 3.0, 6).with_position(-7.0, -10.0, -20.0), "redsky.png"),
        (Shape::new("plane1", ShapeType::Plane, 5.0, 5.0, 0.0, 1).with_position(7.0, -10.0, -20.0), "alps.jpg"),
        (Shape::new("sphere1", ShapeType::Sphere, 5.0, 0.0, 1.0, 30).with_position(-7.0, 0.0, -20.0), "LavaRock.jpg"),
        (Shape::new("torus1", ShapeType::Torus, 5.0, 2.0, 30.0, 20).with_position(7.0, 0.0, -20.0), "spanel.png"),
        (Shape::new("tube1", ShapeType::Tube, 2.0, 4.0, 6.0, 20).with_position(10.0, 10.0, -20.0), "spanel.png"),
        (Shape::new("cylinder1", ShapeType::Cylinder, 3.0, 5.0, 20.0, 20).with_position(0.0, 10.0, -20.0), "clouds.jpg"),
        (Shape::new("cone1", ShapeType::Cone, 3.0, 5.0, 0.0, 20).with_position(-10.0, 10.0, -20.0), "spanel.png"),
        (Shape::new("tcone1", ShapeType::TruncatedCone, 2.0, 5.0, 3.0, 20).with_position(-20.0, 0.0, -20.0), "barktile.jpg"),
        (Shape::new("spring1", ShapeType::Spring, 1.5, 0.2, 15.0, 180).with_position(20.0, 0.0, -20.0), "spanel.png"),
    ];

    for (shape, texture) in shapes {
        app.add_shape(textured(shape.with_color(COLOR), dir, texture));
    }

    let mut zang = 0.0f32;
    app.on_frame(move |scene, _input| {
        scene.shape_mut("cube1").rotate(3.0, 0.0, 1.0);

        let plane = scene.shape_mut("plane1");
        plane.rotate(0.0, 0.0, 1.0);
        plane.position.z = zang.cos() * 5.0 - 20.0;
        zang += 0.1;

        scene.shape_mut("sphere1").rotate(1.0, 0.5, 0.0);
        scene.shape_mut("torus1").rotate(0.7, 2.0, 0.0);
        scene.shape_mut("tube1").rotate(0.3, 3.0, 0.0);
        scene.shape_mut("cone1").rotate(0.3, 3.0, 0.0);
        scene.shape_mut("tcone1").rotate(2.0, 3.0, 0.0);
        scene.shape_mut("spring1").rotate(2.0, 3.0, 0.0);
        scene.shape_mut("cylinder1").rotate(0.5, 0.3, 0.1);
    });

    app.run()
}

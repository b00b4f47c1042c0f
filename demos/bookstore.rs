//! Bookstore corner demo
//!
//! Assembles a minimal bookstore interior: a floor, a café counter with a
//! few jars, and a shelf anchor. The shelf model is loaded from disk when
//! available and generated procedurally otherwise, then laid out with the
//! stock catalog and a fixed seed so every run dresses the shelf the same
//! way.
//!
//! Run with `RUST_LOG=debug cargo run --example bookstore` to see the
//! layout engine's decisions.

use anyhow::Result;
use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};
use log::warn;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f32::consts::FRAC_PI_2;

use folio::assets;
use folio::catalog::Catalog;
use folio::geometry::{generate_box, generate_cylinder, generate_plane, generate_shelf};
use folio::layout::{layout_contents, LayoutConfig};
use folio::scene::{Material, NodeId, Object, SceneGraph};

fn main() -> Result<()> {
    env_logger::init();

    let mut scene = SceneGraph::new();
    let root = scene.root();

    // Set dressing
    scene.add_object(
        root,
        Object::new("floor", vec![generate_plane(50.0, 50.0, 6, 6)]),
        Matrix4::identity(),
    );

    let counter = scene.add_group(
        root,
        "cafe-counter",
        Matrix4::from_translation(Vector3::new(0.0, 0.0, 0.0)),
    );
    for i in 0..5 {
        scene.add_object(
            counter,
            Object::new("jar", vec![generate_cylinder(0.08, 0.4, 12)]),
            Matrix4::from_translation(Vector3::new(-2.0 + i as f32, 2.7, -0.8)),
        );
    }

    // Neon sign above the counter
    scene.materials.add_material(
        Material::new("neon-sign", [1.0, 0.1, 0.1, 1.0], 0.0, 0.2).with_emission(1.0, 0.1, 0.1),
    );
    scene.add_object(
        root,
        Object::new("neon-sign", vec![generate_box(4.0, 1.5, 0.1)]).with_material("neon-sign"),
        Matrix4::from_translation(Vector3::new(0.0, 3.0, -1.5)),
    );

    // Shelf anchor along the west wall, rotated to face the room
    let anchor = scene.add_group(
        root,
        "shelf-anchor",
        Matrix4::from_translation(Vector3::new(-15.0, 0.0, -8.0))
            * Matrix4::from_angle_y(Rad(FRAC_PI_2)),
    );

    // Container ready: either the loaded model or the procedural fallback
    let mut container: Option<NodeId> = None;
    assets::load_model(
        "models/shelf.obj",
        |model| {
            container = Some(assets::attach_model(&mut scene, anchor, model));
        },
        |err| {
            warn!("shelf model unavailable, using procedural shelf: {err}");
        },
    );
    let container = container.unwrap_or_else(|| {
        scene.add_object(
            anchor,
            Object::new("shelf", vec![generate_shelf(4.0, 5.0, 0.8, 4)]),
            Matrix4::identity(),
        )
    });

    let catalog = Catalog::builtin();
    let config = LayoutConfig {
        rows: 4,
        cols: 10,
        density: 1.2,
        ..LayoutConfig::default()
    };

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let placed = layout_contents(&mut scene, anchor, container, &catalog, &config, &mut rng)?;

    let stats = scene.statistics();
    println!("placed {placed} items on the shelf");
    println!(
        "scene: {} nodes, {} objects ({} clickable), {} triangles",
        stats.node_count, stats.object_count, stats.clickable_count, stats.total_triangles
    );

    // What the picking system would surface for the first item
    if let Some(pick) = scene
        .subtree(root)
        .into_iter()
        .filter_map(|id| scene.object(id))
        .find_map(|object| object.pick_metadata())
    {
        println!("try clicking: {} by {} ({})", pick.title, pick.author, pick.price);
    }

    Ok(())
}

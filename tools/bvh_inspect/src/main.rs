use anyhow::{bail, Context, Result};
use clap::{Arg, Command};
use mesh_collision::config::{CollisionConfig, Config};
use mesh_collision::foundation::{logging, math::Vec3};
use mesh_collision::physics::collision::SphereShape;
use mesh_collision::spatial::{self, gpu, MeshTree};
use std::path::PathBuf;

mod mesh;

const DEFAULT_GRID_SIZE: &str = "16";

fn main() -> Result<()> {
    let matches = Command::new("bvh_inspect")
        .about("Builds a collision tree over a mesh and prints its shape and query results")
        .arg(
            Arg::new("mesh")
                .value_name("OBJ")
                .help("OBJ file to load; a procedural grid is used when omitted"),
        )
        .arg(
            Arg::new("grid")
                .short('g')
                .long("grid")
                .value_name("N")
                .help("Size of the procedural N x N quad grid")
                .default_value(DEFAULT_GRID_SIZE),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Collision settings (.toml or .ron)"),
        )
        .arg(
            Arg::new("ray")
                .short('r')
                .long("ray")
                .value_name("X,Y,Z,X,Y,Z")
                .help("Cast a ray from the first point to the second")
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("sphere")
                .short('s')
                .long("sphere")
                .value_name("X,Y,Z,R")
                .help("List every triangle overlapping a sphere")
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Default log filter when RUST_LOG is unset")
                .default_value("info"),
        )
        .get_matches();

    if let Some(level) = matches.get_one::<String>("log-level") {
        logging::init_with_level(level);
    }

    let config = match matches.get_one::<String>("config") {
        Some(path) => CollisionConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {path}"))?,
        None => CollisionConfig::default(),
    };
    config.validate().context("Invalid collision config")?;

    let mesh = match matches.get_one::<String>("mesh") {
        Some(path) => mesh::load_obj(&PathBuf::from(path))?,
        None => {
            let size: u32 = matches
                .get_one::<String>("grid")
                .map_or(DEFAULT_GRID_SIZE, String::as_str)
                .parse()
                .context("Invalid grid size")?;
            mesh::grid(size)?
        }
    };

    let tree = MeshTree::with_config(&mesh.vertices, &mesh.elements, &config)
        .context("Failed to build collision tree")?;
    print_summary(&tree);

    if let Some(ray) = matches.get_one::<String>("ray") {
        let [x0, y0, z0, x1, y1, z1] = parse_floats::<6>(ray).context("Invalid --ray")?;
        cast_ray(&tree, &config, Vec3::new(x0, y0, z0), Vec3::new(x1, y1, z1));
    }

    if let Some(sphere) = matches.get_one::<String>("sphere") {
        let [x, y, z, r] = parse_floats::<4>(sphere).context("Invalid --sphere")?;
        if r < 0.0 {
            bail!("Sphere radius must not be negative, got {r}");
        }
        query_sphere(&tree, &SphereShape::new(Vec3::new(x, y, z), r));
    }

    Ok(())
}

fn print_summary(tree: &MeshTree<'_>) {
    println!("Triangles:      {}", tree.triangle_count());
    println!("Nodes:          {}", tree.nodes().len());
    println!("Root:           {}", tree.root_index());
    match tree.bbox() {
        Some(bbox) => println!(
            "Bounds:         ({:.3}, {:.3}, {:.3}) - ({:.3}, {:.3}, {:.3})",
            bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z
        ),
        None => println!("Bounds:         empty"),
    }
    println!("Min depth:      {}", tree.min_depth());
    println!("Max depth:      {}", tree.max_depth());
    println!("Average depth:  {:.2}", tree.average_depth());
    println!("Balanced depth: {:.2}", tree.balanced_depth());

    let gpu_nodes = tree.gpu_nodes();
    println!("GPU buffer:     {} bytes", gpu::as_bytes(&gpu_nodes).len());
}

fn cast_ray(tree: &MeshTree<'_>, config: &CollisionConfig, start: Vec3, end: Vec3) {
    let total = (end - start).magnitude();
    println!(
        "Ray length {:.3}, segment length {:.3}",
        total,
        spatial::segment_length(total, &config.ray_segments)
    );

    match spatial::first_hit_segmented(tree, &start, &end, &config.ray_segments) {
        Some(hit) => println!(
            "Ray hit triangle {} at fraction {:.5} (distance {:.3}, point ({:.3}, {:.3}, {:.3}), barycentric {:.3}, {:.3})",
            hit.triangle, hit.fraction, hit.distance, hit.point.x, hit.point.y, hit.point.z, hit.b, hit.c
        ),
        None => println!("Ray missed"),
    }
}

fn query_sphere(tree: &MeshTree<'_>, sphere: &SphereShape) {
    let hits = tree.all_hits(sphere);
    if hits.is_empty() {
        println!("Sphere overlaps nothing");
    } else {
        println!("Sphere overlaps {} triangles: {:?}", hits.len(), hits);
    }
}

/// Parse exactly `N` comma-separated floats
fn parse_floats<const N: usize>(text: &str) -> Result<[f32; N]> {
    let values = text
        .split(',')
        .map(|part| part.trim().parse::<f32>().with_context(|| format!("'{part}' is not a number")))
        .collect::<Result<Vec<_>>>()?;

    let count = values.len();
    values
        .try_into()
        .map_err(|_| anyhow::anyhow!("Expected {N} comma-separated values, got {count}"))
}

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use shadegraph::{
    FallbackPolicy, RecordingScene, SceneDocument, SceneSync, SourceScene, SyncOpts,
    TranslateOpts, Translator,
};

#[derive(Parser, Debug)]
#[command(name = "shadegraph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate materials and the world to IR and print them as JSON.
    Translate(TranslateArgs),
    /// Sync the whole scene into an in-memory render scene and print totals.
    Sync(SyncArgs),
    /// Check a scene document and report every schema error.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Translate only this material.
    #[arg(long)]
    material: Option<String>,

    /// Deepest producer chain to follow.
    #[arg(long, default_value_t = TranslateOpts::default().max_depth)]
    max_depth: usize,
}

#[derive(Parser, Debug)]
struct SyncArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Skip duplication placements.
    #[arg(long)]
    no_instancers: bool,

    /// Leave depth of field off on every camera.
    #[arg(long)]
    no_dof: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Translate(args) => cmd_translate(args),
        Command::Sync(args) => cmd_sync(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_doc(path: &Path) -> anyhow::Result<SceneDocument> {
    SceneDocument::from_path(path).with_context(|| format!("read scene '{}'", path.display()))
}

fn load_scene(path: &Path) -> anyhow::Result<SourceScene> {
    let doc = read_doc(path)?;
    doc.resolve()
        .with_context(|| format!("resolve scene '{}'", path.display()))
}

fn cmd_translate(args: TranslateArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let policy = FallbackPolicy::new();
    let mut translator = Translator::new(
        &policy,
        TranslateOpts {
            max_depth: args.max_depth,
        },
    );

    let mut materials = BTreeMap::new();
    for mat in scene.materials() {
        if args.material.as_deref().is_some_and(|m| m != mat.name) {
            continue;
        }
        let ir = if mat.use_nodes {
            mat.tree
                .as_ref()
                .and_then(|t| translator.translate_material(t))
        } else {
            None
        };
        materials.insert(mat.name.clone(), ir);
    }
    if let Some(name) = &args.material {
        anyhow::ensure!(materials.contains_key(name), "no material named '{name}'");
    }

    let world = match args.material {
        Some(_) => None,
        None => scene
            .world()
            .and_then(|w| translator.translate_background(w)),
    };

    let out = serde_json::json!({
        "materials": materials,
        "world": world,
        "diagnostics": translator.take_diagnostics(),
    });
    let text = serde_json::to_string_pretty(&out).context("serialize IR")?;
    println!("{text}");
    Ok(())
}

fn cmd_sync(args: SyncArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let policy = FallbackPolicy::new();
    let opts = SyncOpts {
        include_instancers: !args.no_instancers,
        depth_of_field: !args.no_dof,
        ..SyncOpts::default()
    };
    let mut sync = SceneSync::new(&policy, TranslateOpts::default(), opts);
    let mut target = RecordingScene::new();
    let stats = sync.sync_scene(&scene, &mut target)?;

    let out = serde_json::json!({
        "stats": stats,
        "totals": target.totals(),
        "diagnostics": sync.take_diagnostics(),
    });
    let text = serde_json::to_string_pretty(&out).context("serialize sync report")?;
    println!("{text}");
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let doc = read_doc(&args.in_path)?;
    doc.validate()?;
    eprintln!("{}: ok", args.in_path.display());
    Ok(())
}

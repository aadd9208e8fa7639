use clap::{Args as ClapArgs, Parser, Subcommand};
use jne_core::{
    DocumentStore, EditError, EditOpts, NodeEditor, Path, SharedDocument, WriteMode,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "jne-cli",
    about = "Inspect and edit nodes of a JSON document by path",
    version
)]
struct Cli {
    /// Log edits and publishes (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the value at a path (root when no path is given)
    Get(GetArgs),
    /// List children of the node at a path
    List(GetArgs),
    /// Replace the value at a path; prints or writes with --out
    Set(SetArgs),
    /// Render a path as $["key"][0]
    Fmt(NodePath),
}

#[derive(ClapArgs, Debug)]
#[group(multiple = false)]
struct NodePath {
    /// Path as a JSON array, e.g. '["customer", 0]'
    #[arg(long)]
    path: Option<String>,
    /// Path as a JSON Pointer, e.g. /customer/0
    #[arg(long)]
    ptr: Option<String>,
}

impl NodePath {
    fn parse(&self) -> Result<Path, EditError> {
        match (&self.path, &self.ptr) {
            (Some(p), _) => Path::parse_json(p),
            (None, Some(ptr)) => Path::from_pointer(ptr),
            (None, None) => Ok(Path::root()),
        }
    }
}

#[derive(ClapArgs, Debug)]
struct GetArgs {
    /// JSON file to load
    file: PathBuf,
    #[command(flatten)]
    node: NodePath,
    /// Emit compact JSON
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(ClapArgs, Debug)]
struct SetArgs {
    /// JSON file to load
    file: PathBuf,
    #[command(flatten)]
    node: NodePath,
    /// New value as raw JSON (e.g., 123, true, "str", {"a":1})
    #[arg(long)]
    value: String,
    /// Refuse to overwrite non-container values along the path
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Optional output .json path to write; otherwise prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Skip the timestamped backup when --out already exists
    #[arg(long, default_value_t = false)]
    no_backup: bool,
    /// Emit compact JSON
    #[arg(long, default_value_t = false)]
    compact: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Cmd::Get(a) => cmd_get(a),
        Cmd::List(a) => cmd_list(a),
        Cmd::Set(a) => cmd_set(a),
        Cmd::Fmt(a) => cmd_fmt(a),
    }
}

fn fail(code: i32, msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(code);
}

fn load(file: &std::path::Path) -> SharedDocument {
    match jne_core::load_json_file(file) {
        Ok(v) => SharedDocument::new(v),
        Err(e) => fail(2, e),
    }
}

fn cmd_get(args: GetArgs) {
    let path = args.node.parse().unwrap_or_else(|e| fail(3, e));
    let store = load(&args.file);
    let opts = EditOpts { pretty: !args.compact, ..EditOpts::default() };
    let editor = NodeEditor::open(&store, path, opts);
    if editor.is_missing() {
        fail(3, format!("not found: {}", editor.display_path()));
    }
    println!("{}", editor.buffer());
}

fn cmd_list(args: GetArgs) {
    let path = args.node.parse().unwrap_or_else(|e| fail(3, e));
    let store = load(&args.file);
    let root = store.current().root;
    match jne_core::list_children(&root, &path) {
        Ok(children) => {
            for c in children {
                println!(
                    "{}\t{:?}{}",
                    path.child(c.segment),
                    c.kind,
                    c.len.map(|n| format!("\t(len={})", n)).unwrap_or_default()
                );
            }
        }
        Err(e) => fail(3, e),
    }
}

fn cmd_set(args: SetArgs) {
    let path = args.node.parse().unwrap_or_else(|e| fail(3, e));
    let store = load(&args.file);
    let opts = EditOpts {
        mode: if args.strict { WriteMode::Strict } else { WriteMode::Permissive },
        pretty: !args.compact,
        backup_on_save: !args.no_backup,
    };
    let mut editor = NodeEditor::open(&store, path, opts);
    editor.set_buffer(args.value);
    if let Err(e) = editor.commit(&store) {
        match e {
            EditError::MalformedInput(_) => fail(3, format!("invalid --value JSON: {}", e)),
            other => fail(4, other),
        }
    }
    let root = store.current().root;
    if let Some(out) = args.out {
        match jne_core::save_json_file(&out, &root, &opts) {
            Ok(Some(backup)) => tracing::info!(backup = %backup.display(), "previous file backed up"),
            Ok(None) => {}
            Err(e) => fail(5, format!("error writing: {}", e)),
        }
    } else {
        println!("{}", jne_core::render_value(&root, opts.pretty));
    }
}

fn cmd_fmt(args: NodePath) {
    let path = args.parse().unwrap_or_else(|e| fail(3, e));
    println!("{}", jne_core::format_path(&path));
}

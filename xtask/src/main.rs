use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Function binaries shipped as individual Lambda artifacts.
const LAMBDA_BINARIES: [&str; 6] = [
    "api_handler",
    "event_processor",
    "data_transformer",
    "file_processor",
    "notification",
    "workflow_orchestrator",
];

const LAMBDA_PACKAGE: &str = "event_pipeline_lambda";
const DIST_DIR: &str = "infra/dist";

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the event pipeline workspace",
    long_about = "Builds, checks and packages the event pipeline Lambda functions."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the workspace test suites
    Test,
    /// Run CI checks
    Ci {
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build every function binary and zip each one as a Lambda `bootstrap`
    ServerlessPackage {
        /// Compilation target triple for Lambda binaries
        #[arg(long, env = "LAMBDA_TARGET", default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Package a single function instead of all of them
        #[arg(long)]
        function: Option<String>,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Release build of the function binaries
    Package,
    /// Run check + package
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn selected_binaries(function: Option<&str>) -> Vec<&'static str> {
    match function {
        None => LAMBDA_BINARIES.to_vec(),
        Some(name) => match LAMBDA_BINARIES.iter().find(|bin| **bin == name) {
            Some(bin) => vec![*bin],
            None => {
                eprintln!(
                    "unknown function `{name}`; expected one of: {}",
                    LAMBDA_BINARIES.join(", ")
                );
                exit(2);
            }
        },
    }
}

fn build_lambdas(target: &str, profile: BuildProfile, binaries: &[&str]) {
    step("Build lambda binaries");

    let mut cargo_args = vec!["build", "-p", LAMBDA_PACKAGE, "--target", target];
    for bin in binaries {
        cargo_args.push("--bin");
        cargo_args.push(bin);
    }
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);
}

fn package_serverless_lambdas(target: &str, profile: BuildProfile, function: Option<&str>) {
    let binaries = selected_binaries(function);
    ensure_rust_target_installed(target);
    build_lambdas(target, profile, &binaries);

    step("Package lambda zip artifacts");
    let target_dir = Path::new("target").join(target).join(profile.dir_name());
    let dist_dir = Path::new(DIST_DIR);
    fs::create_dir_all(dist_dir).expect("failed to create lambda dist directory");

    let artifacts: Vec<PathBuf> = binaries
        .iter()
        .map(|bin| {
            let zip_path = dist_dir.join(format!("{bin}.zip"));
            package_lambda_zip(&target_dir.join(binary_name(bin, target)), &zip_path);
            zip_path
        })
        .collect();

    eprintln!("\nPackaged artifacts:");
    for artifact in artifacts {
        eprintln!("- {}", artifact.display());
    }
}

fn ensure_rust_target_installed(target: &str) {
    let output = match Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    {
        Ok(value) => value,
        Err(error) => {
            eprintln!(
                "warning: failed to run `rustup target list --installed` ({error}); continuing without target preflight"
            );
            return;
        }
    };

    let installed = String::from_utf8_lossy(&output.stdout);
    if output.status.success() && !installed.lines().any(|line| line.trim() == target) {
        eprintln!(
            "required rust target `{target}` is not installed. install it with `rustup target add {target}`"
        );
        exit(1);
    }
}

fn binary_name(bin_name: &str, target: &str) -> String {
    if target.contains("windows") {
        format!("{bin_name}.exe")
    } else {
        bin_name.to_string()
    }
}

fn package_lambda_zip(binary_path: &Path, zip_path: &Path) {
    if !binary_path.exists() {
        eprintln!("expected lambda binary at '{}'", binary_path.display());
        exit(1);
    }

    let binary = fs::read(binary_path).expect("failed to read lambda binary");
    let file = fs::File::create(zip_path).expect("failed to create lambda zip");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .expect("failed to start bootstrap entry in lambda zip");
    zip.write_all(&binary)
        .expect("failed to write bootstrap entry");
    zip.finish().expect("failed to finish lambda zip");
}

fn run_tests() {
    step("Test event_pipeline_core");
    run_cargo(&["test", "-p", "event_pipeline_core"]);

    step("Test event_pipeline_lambda");
    run_cargo(&["test", "-p", LAMBDA_PACKAGE]);
}

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    run_tests();
}

fn ci_package() {
    step("Release build of function binaries");
    run_cargo(&["build", "-p", LAMBDA_PACKAGE, "--bins", "--release"]);
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Test => run_tests(),
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Package => ci_package(),
                CiJob::All => {
                    ci_check();
                    ci_package();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::ServerlessPackage {
            target,
            profile,
            function,
        } => package_serverless_lambdas(&target, profile, function.as_deref()),
    }
}

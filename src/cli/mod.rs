//! Command line interface for the Bitcoin Compiler packager.
//!
//! `run` drives the whole sequence: toolchain check, PyInstaller build,
//! bundle validation, optional launch test, distribution guidance.

mod args;
mod output;
mod prompt;
mod runner;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::config;
use crate::error::{CliError, PackagerError, Result};
use crate::packager::error::Error;
use crate::packager::inspect;
use crate::packager::launch;
use crate::packager::pyinstaller::{self, Invocation};
use crate::packager::settings::{Settings, SettingsBuilder};

/// Main CLI entry point.
///
/// Returns the process exit code. Planned failures (declined install,
/// missing bundle, missing executable) come back as `Ok(1)` with guidance
/// already printed; `Err` is reserved for unexpected failures.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    args.validate()
        .map_err(|reason| PackagerError::Cli(CliError::InvalidArguments { reason }))?;

    let runtime_config = RuntimeConfig::from(&args);
    let settings = resolve_settings(&args, &runtime_config)?;

    runtime_config.section(&format!("Packaging {} for macOS", settings.product_name()))?;

    // Step 1: PyInstaller on PATH, or offer to install it
    if !ensure_pyinstaller(&args, &runtime_config).await? {
        return Ok(1);
    }

    // Step 2: run the PyInstaller build
    let invocation = Invocation::choose(&settings);
    match &invocation {
        Invocation::SpecFile(spec) => {
            runtime_config.progress(&format!("Building with spec file {}", spec.display()))?;
        }
        Invocation::CommandLine => {
            if !settings.entry_script().exists() {
                let err = Error::EntryScriptMissing {
                    path: settings.entry_script().to_path_buf(),
                };
                runtime_config.error(&err.to_string())?;
                runtime_config
                    .indent("Run from the project root, or point --entry at the GUI script.")?;
                return Ok(1);
            }
            runtime_config.progress(&format!(
                "No {} found, building from command-line flags",
                settings.spec_file().display()
            ))?;
        }
    }

    let pyinstaller_args = invocation.args(&settings)?;
    log::debug!("pyinstaller args: {:?}", pyinstaller_args);

    let mut command = tokio::process::Command::new("pyinstaller");
    command.args(&pyinstaller_args);
    let status =
        runner::run_streaming(command, "pyinstaller", runner::BUILD_TIMEOUT, &runtime_config)
            .await?;
    if !status.success() {
        return Err(Error::ToolFailed {
            tool: "pyinstaller".to_string(),
            status,
        }
        .into());
    }
    runtime_config.success("PyInstaller finished")?;

    // Step 3: validate what PyInstaller produced
    if !validate_bundle(&settings, &runtime_config).await? {
        return Ok(1);
    }

    // Step 4: optional interactive smoke test
    maybe_launch(&args, &settings, &runtime_config).await?;

    // Step 5: distribution guidance
    print_next_steps(&settings, &runtime_config)?;

    Ok(0)
}

/// Builds Settings from CLI flags, optional `packager.toml`, and defaults.
///
/// Flags win over the file; the file wins over defaults.
fn resolve_settings(args: &Args, runtime_config: &RuntimeConfig) -> Result<Settings> {
    let mut builder = SettingsBuilder::new();

    if let Some(name) = &args.name {
        builder = builder.product_name(name.clone());
    }
    if let Some(executable) = &args.executable {
        builder = builder.executable_name(executable.clone());
    }
    if let Some(identifier) = &args.identifier {
        builder = builder.bundle_identifier(identifier.clone());
    }
    if let Some(entry) = &args.entry {
        builder = builder.entry_script(entry);
    }
    if let Some(spec) = &args.spec {
        builder = builder.spec_file(spec);
    }
    if let Some(dist) = &args.dist {
        builder = builder.dist_dir(dist);
    }

    if let Some(file) = config::load(std::path::Path::new("."))? {
        runtime_config.verbose_println(&format!("Loaded {}", config::CONFIG_FILE_NAME))?;
        builder = builder.merge_file(file);
    }

    Ok(builder.build()?)
}

/// Step 1: confirm PyInstaller is installed, offering to install it when not.
///
/// Returns false when the operator declines the install; the run stops with
/// exit code 1 and no packaging happens.
async fn ensure_pyinstaller(args: &Args, runtime_config: &RuntimeConfig) -> Result<bool> {
    runtime_config.progress("Checking for PyInstaller")?;

    if let Some(path) = pyinstaller::find_pyinstaller() {
        match pyinstaller::pyinstaller_version(&path).await {
            Some(version) => {
                runtime_config.success(&format!(
                    "PyInstaller {} found at {}",
                    version,
                    path.display()
                ))?;
            }
            None => {
                runtime_config.success(&format!("PyInstaller found at {}", path.display()))?;
            }
        }
        return Ok(true);
    }

    runtime_config.warn("PyInstaller is not installed")?;

    let install = args.assume_yes
        || prompt::confirm("Install PyInstaller now (python3 -m pip install pyinstaller)?")?;

    if !install {
        runtime_config.error("PyInstaller is required to build the app bundle.")?;
        runtime_config.indent("Install it manually with: python3 -m pip install pyinstaller")?;
        return Ok(false);
    }

    install_pyinstaller(runtime_config).await?;
    Ok(true)
}

/// Installs PyInstaller through pip, streaming pip's output.
///
/// Fails when `python3` is missing, pip exits non-zero, or the tool still
/// cannot be found on PATH afterwards.
async fn install_pyinstaller(runtime_config: &RuntimeConfig) -> Result<()> {
    let python = which::which("python3").map_err(|_| {
        PackagerError::Cli(CliError::ExecutionFailed {
            command: "python3".to_string(),
            reason: "python3 not found on PATH.\n\
                     \n\
                     Install Python 3 first:\n\
                     • macOS: brew install python\n\
                     • or download it from https://www.python.org/downloads/"
                .to_string(),
        })
    })?;

    runtime_config.progress(&format!(
        "Installing PyInstaller: {} -m pip install pyinstaller",
        python.display()
    ))?;

    let mut command = tokio::process::Command::new(&python);
    command.args(["-m", "pip", "install", "pyinstaller"]);
    let status = runner::run_streaming(
        command,
        "pip install pyinstaller",
        runner::INSTALL_TIMEOUT,
        runtime_config,
    )
    .await?;

    if !status.success() {
        return Err(Error::ToolFailed {
            tool: "pip install pyinstaller".to_string(),
            status,
        }
        .into());
    }

    match pyinstaller::find_pyinstaller() {
        Some(path) => {
            runtime_config.success(&format!("PyInstaller installed at {}", path.display()))?;
            Ok(())
        }
        None => Err(Error::GenericError(
            "pip reported success but pyinstaller is still not on PATH.\n\
             \n\
             pip may have installed it into a user site directory that your\n\
             shell does not search. Try:\n\
             • restarting the terminal session\n\
             • adding the Python user bin directory to PATH (python3 -m site --user-base)\n\
             • installing with: python3 -m pip install --user pyinstaller"
                .to_string(),
        )
        .into()),
    }
}

/// Step 3: check the produced bundle and report on it.
///
/// Returns false for the fatal cases (bundle or executable missing); the
/// format and Dock checks only ever warn.
async fn validate_bundle(settings: &Settings, runtime_config: &RuntimeConfig) -> Result<bool> {
    let app_path = settings.app_bundle_path();
    if !app_path.is_dir() {
        let err = Error::BundleMissing {
            path: app_path.clone(),
        };
        runtime_config.error(&err.to_string())?;
        runtime_config.indent("Check the PyInstaller output above. Common causes:")?;
        runtime_config.indent("• missing Python packages (pip install -r requirements.txt)")?;
        runtime_config.indent("• a Python version PyInstaller does not support yet")?;
        runtime_config.indent("• stale build state (delete build/ and dist/, then retry)")?;
        return Ok(false);
    }

    let size = inspect::bundle_size(&app_path);
    runtime_config.success(&format!(
        "Bundle created: {} ({})",
        app_path.display(),
        inspect::format_size(size)
    ))?;

    let checksum = inspect::calculate_sha256(&app_path).await?;
    runtime_config.indent(&format!("SHA-256: {}", checksum))?;

    let executable_path = settings.executable_path();
    if !executable_path.is_file() {
        let err = Error::ExecutableMissing {
            path: executable_path.clone(),
        };
        runtime_config.error(&err.to_string())?;
        runtime_config.indent("PyInstaller finished but did not place the expected binary.")?;
        runtime_config.indent(
            "If the spec file renames the app, pass --name/--executable to match it.",
        )?;
        return Ok(false);
    }
    runtime_config.success(&format!("Executable present: {}", executable_path.display()))?;

    // Advisory: binary format
    match inspect::binary_format(&executable_path).await {
        Ok(format) if format.is_app_executable() => {
            runtime_config.success(&format!("Binary format: {}", format))?;
        }
        Ok(format) => {
            runtime_config.warn(&format!(
                "{} is {}, not a Mach-O executable; the app may not start on macOS",
                executable_path.display(),
                format
            ))?;
        }
        Err(e) => {
            runtime_config.warn(&format!("could not inspect the binary format: {}", e))?;
        }
    }

    // Advisory: Dock visibility
    match inspect::dock_visibility(&settings.info_plist_path()) {
        Ok(visibility) if visibility.is_visible() => {
            runtime_config.success("App will be visible in the Dock")?;
        }
        Ok(_) => {
            runtime_config.warn(
                "LSUIElement is set in Info.plist: the app will be hidden from the Dock",
            )?;
        }
        Err(e) => {
            runtime_config.warn(&format!("could not read Info.plist: {}", e))?;
        }
    }

    Ok(true)
}

/// Step 4: offer to open the bundle and print the manual checklist.
///
/// Declining produces no launch-related output.
async fn maybe_launch(
    args: &Args,
    settings: &Settings,
    runtime_config: &RuntimeConfig,
) -> Result<()> {
    if args.no_launch {
        return Ok(());
    }

    let launch_now = args.launch
        || prompt::confirm(&format!(
            "Launch {} now for a quick smoke test?",
            settings.product_name()
        ))?;

    if !launch_now {
        return Ok(());
    }

    let app_path = settings.app_bundle_path();
    runtime_config.progress(&format!("Launching {}", app_path.display()))?;

    if let Err(e) = launch::open_bundle(&app_path).await {
        runtime_config.warn(&format!("could not launch the app: {}", e))?;
        return Ok(());
    }

    runtime_config.verbose_println("While the app is up, check that:")?;
    runtime_config.indent("• no console window flashes behind the GUI")?;
    runtime_config.indent("• the app stays open instead of exiting immediately")?;
    runtime_config.indent("• the main window appears and is responsive")?;
    Ok(())
}

/// Step 5: distribution guidance once the bundle validates.
fn print_next_steps(settings: &Settings, runtime_config: &RuntimeConfig) -> Result<()> {
    let app_path = settings.app_bundle_path();

    runtime_config.section("Next steps")?;
    runtime_config.indent("1. Test the app on another Mac, ideally one without Python installed.")?;
    runtime_config.indent(&format!(
        "2. Archive it for distribution: zip -r \"{}.zip\" \"{}\"",
        settings.product_name(),
        app_path.display()
    ))?;
    runtime_config.indent(&format!(
        "3. Optional: sign it: codesign --force --deep --sign \"Developer ID Application: <identity>\" \"{}\"",
        app_path.display()
    ))?;
    runtime_config.indent(&format!(
        "4. Optional: build an installer image: create-dmg \"{}\" (brew install create-dmg)",
        app_path.display()
    ))?;
    Ok(())
}

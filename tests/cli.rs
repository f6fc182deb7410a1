//! End-to-end tests of the packaging sequence.
//!
//! Each test runs the real binary in a scratch working directory with a
//! controlled `PATH`: stub `pyinstaller` (and `python3`, where the install
//! flow is under test) shell scripts record their argument vectors and lay
//! out whatever bundle shape the scenario calls for.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

const PLIST_VISIBLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
  <key>CFBundleName</key>
  <string>Bitcoin Compiler</string>
</dict>
</plist>"#;

const PLIST_HIDDEN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
  <key>CFBundleName</key>
  <string>Bitcoin Compiler</string>
  <key>LSUIElement</key>
  <true/>
</dict>
</plist>"#;

/// Writes an executable stub script into `dir`.
fn write_stub(dir: &Path, name: &str, script: &str) {
    let path = dir.join(name);
    fs::write(&path, script).expect("write stub");
    let mut perms = fs::metadata(&path).expect("stub metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod stub");
}

/// Builds a stub `pyinstaller` script.
///
/// The stub answers `--version`, records its build argv to
/// `pyinstaller_args.txt` in the working directory, and creates
/// `bundle_dir` (when given) with an Info.plist and, optionally, the main
/// executable.
fn pyinstaller_stub(bundle: Option<(&str, Option<&str>, &str)>) -> String {
    let mut script = String::from(
        "#!/bin/sh\n\
         if [ \"$1\" = \"--version\" ]; then\n\
         \x20 echo 6.6.0\n\
         \x20 exit 0\n\
         fi\n\
         printf '%s\\n' \"$@\" > pyinstaller_args.txt\n",
    );
    if let Some((bundle_dir, executable, plist)) = bundle {
        script.push_str(&format!(
            "mkdir -p \"{dir}/Contents/MacOS\"\n\
             cat > \"{dir}/Contents/Info.plist\" <<'PLIST'\n\
             {plist}\n\
             PLIST\n",
            dir = bundle_dir,
            plist = plist,
        ));
        if let Some(name) = executable {
            script.push_str(&format!(
                "printf 'stub binary' > \"{dir}/Contents/MacOS/{name}\"\n",
                dir = bundle_dir,
                name = name,
            ));
        }
    }
    script
}

/// Command for the binary under test, run inside `workdir` with `bin_dir`
/// first on `PATH`.
fn packager(workdir: &Path, bin_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bitcoin_compiler_packager").expect("binary under test");
    cmd.current_dir(workdir)
        .env("PATH", format!("{}:/usr/bin:/bin", bin_dir.display()))
        .env_remove("RUST_LOG");
    cmd
}

fn recorded_args(workdir: &Path) -> String {
    fs::read_to_string(workdir.join("pyinstaller_args.txt")).expect("recorded argv")
}

#[test]
fn declined_install_exits_one_without_packaging() {
    let work = TempDir::new().expect("work dir");
    let empty_bin = TempDir::new().expect("bin dir");

    // PATH is only the empty stub dir, so pyinstaller cannot be found and
    // nothing can accidentally run.
    Command::cargo_bin("bitcoin_compiler_packager")
        .expect("binary under test")
        .current_dir(work.path())
        .env("PATH", empty_bin.path())
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("PyInstaller is required"));

    assert!(!work.path().join("pyinstaller_args.txt").exists());
    assert!(!work.path().join("dist").exists());
}

#[test]
fn spec_file_mode_invokes_exactly_the_spec() {
    let work = TempDir::new().expect("work dir");
    let bin = TempDir::new().expect("bin dir");
    fs::write(work.path().join("bitcoin_compiler.spec"), "# pyinstaller spec\n")
        .expect("write spec");
    write_stub(
        bin.path(),
        "pyinstaller",
        &pyinstaller_stub(Some((
            "dist/Bitcoin Compiler.app",
            Some("BitcoinCompiler"),
            PLIST_VISIBLE,
        ))),
    );

    packager(work.path(), bin.path())
        .arg("--no-launch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Building with spec file"))
        .stdout(predicate::str::contains("Executable present"));

    assert_eq!(
        recorded_args(work.path()),
        "bitcoin_compiler.spec\n--clean\n--noconfirm\n"
    );
}

#[test]
fn fallback_mode_uses_windowed_onedir_flags() {
    let work = TempDir::new().expect("work dir");
    let bin = TempDir::new().expect("bin dir");
    fs::write(work.path().join("compile_bitcoind_gui.py"), "# gui\n").expect("write entry");
    write_stub(
        bin.path(),
        "pyinstaller",
        &pyinstaller_stub(Some((
            "dist/Bitcoin Compiler.app",
            Some("BitcoinCompiler"),
            PLIST_VISIBLE,
        ))),
    );

    packager(work.path(), bin.path())
        .arg("--no-launch")
        .assert()
        .success()
        .stdout(predicate::str::contains("building from command-line flags"));

    assert_eq!(
        recorded_args(work.path()),
        "--clean\n--noconfirm\n--windowed\n--onedir\n--name\nBitcoin Compiler\n\
         --osx-bundle-identifier\ncom.bitcoincompiler.app\ncompile_bitcoind_gui.py\n"
    );
}

#[test]
fn fallback_mode_with_missing_entry_script_fails_before_packaging() {
    let work = TempDir::new().expect("work dir");
    let bin = TempDir::new().expect("bin dir");
    write_stub(bin.path(), "pyinstaller", &pyinstaller_stub(None));

    packager(work.path(), bin.path())
        .arg("--no-launch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("entry script not found"));

    assert!(!work.path().join("pyinstaller_args.txt").exists());
}

#[test]
fn missing_bundle_reports_failure_without_further_checks() {
    let work = TempDir::new().expect("work dir");
    let bin = TempDir::new().expect("bin dir");
    fs::write(work.path().join("bitcoin_compiler.spec"), "# spec\n").expect("write spec");
    // Stub records argv but creates nothing under dist/.
    write_stub(bin.path(), "pyinstaller", &pyinstaller_stub(None));

    packager(work.path(), bin.path())
        .arg("--no-launch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected app bundle was not created"))
        .stdout(predicate::str::contains("SHA-256").not());
}

#[test]
fn missing_executable_exits_one() {
    let work = TempDir::new().expect("work dir");
    let bin = TempDir::new().expect("bin dir");
    fs::write(work.path().join("bitcoin_compiler.spec"), "# spec\n").expect("write spec");
    write_stub(
        bin.path(),
        "pyinstaller",
        &pyinstaller_stub(Some(("dist/Bitcoin Compiler.app", None, PLIST_VISIBLE))),
    );

    packager(work.path(), bin.path())
        .arg("--no-launch")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Bundle created"))
        .stderr(predicate::str::contains("bundle executable is missing"));
}

#[test]
fn hidden_dock_flag_warns_but_build_still_passes() {
    let work = TempDir::new().expect("work dir");
    let bin = TempDir::new().expect("bin dir");
    fs::write(work.path().join("bitcoin_compiler.spec"), "# spec\n").expect("write spec");
    write_stub(
        bin.path(),
        "pyinstaller",
        &pyinstaller_stub(Some((
            "dist/Bitcoin Compiler.app",
            Some("BitcoinCompiler"),
            PLIST_HIDDEN,
        ))),
    );

    packager(work.path(), bin.path())
        .arg("--no-launch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Executable present"))
        .stderr(predicate::str::contains("hidden from the Dock"));
}

#[test]
fn declining_the_launch_prompt_produces_no_launch_output() {
    let work = TempDir::new().expect("work dir");
    let bin = TempDir::new().expect("bin dir");
    fs::write(work.path().join("bitcoin_compiler.spec"), "# spec\n").expect("write spec");
    write_stub(
        bin.path(),
        "pyinstaller",
        &pyinstaller_stub(Some((
            "dist/Bitcoin Compiler.app",
            Some("BitcoinCompiler"),
            PLIST_VISIBLE,
        ))),
    );

    // stdin closes after "n", declining the launch prompt.
    packager(work.path(), bin.path())
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Launching").not())
        .stdout(predicate::str::contains("While the app is up").not())
        .stdout(predicate::str::contains("Next steps"));
}

#[test]
fn failed_launch_is_advisory() {
    let work = TempDir::new().expect("work dir");
    let bin = TempDir::new().expect("bin dir");
    fs::write(work.path().join("bitcoin_compiler.spec"), "# spec\n").expect("write spec");
    write_stub(
        bin.path(),
        "pyinstaller",
        &pyinstaller_stub(Some((
            "dist/Bitcoin Compiler.app",
            Some("BitcoinCompiler"),
            PLIST_VISIBLE,
        ))),
    );
    write_stub(bin.path(), "open", "#!/bin/sh\necho 'no display' >&2\nexit 3\n");

    packager(work.path(), bin.path())
        .arg("--launch")
        .assert()
        .success()
        .stderr(predicate::str::contains("could not launch the app"));
}

#[test]
fn assume_yes_installs_pyinstaller_through_pip() {
    let work = TempDir::new().expect("work dir");
    let bin = TempDir::new().expect("bin dir");
    fs::write(work.path().join("bitcoin_compiler.spec"), "# spec\n").expect("write spec");

    // Stub python3: records pip's argv, then drops a pyinstaller stub into
    // the bin dir so the post-install probe finds it.
    let python_stub = format!(
        "#!/bin/sh\n\
         printf '%s\\n' \"$@\" > pip_args.txt\n\
         cat > \"{bin}/pyinstaller\" <<'EOS'\n\
         #!/bin/sh\n\
         if [ \"$1\" = \"--version\" ]; then\n\
         \x20 echo 6.6.0\n\
         \x20 exit 0\n\
         fi\n\
         printf '%s\\n' \"$@\" > pyinstaller_args.txt\n\
         mkdir -p \"dist/Bitcoin Compiler.app/Contents/MacOS\"\n\
         printf 'stub binary' > \"dist/Bitcoin Compiler.app/Contents/MacOS/BitcoinCompiler\"\n\
         printf '%s' '<plist version=\"1.0\"><dict/></plist>' \
         > \"dist/Bitcoin Compiler.app/Contents/Info.plist\"\n\
         EOS\n\
         chmod +x \"{bin}/pyinstaller\"\n",
        bin = bin.path().display(),
    );
    write_stub(bin.path(), "python3", &python_stub);

    packager(work.path(), bin.path())
        .args(["--assume-yes", "--no-launch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PyInstaller installed"));

    let pip_args = fs::read_to_string(work.path().join("pip_args.txt")).expect("pip argv");
    assert_eq!(pip_args, "-m\npip\ninstall\npyinstaller\n");
    assert_eq!(
        recorded_args(work.path()),
        "bitcoin_compiler.spec\n--clean\n--noconfirm\n"
    );
}

#[test]
fn packager_toml_is_honored_and_flags_win() {
    let work = TempDir::new().expect("work dir");
    let bin = TempDir::new().expect("bin dir");
    fs::write(
        work.path().join("packager.toml"),
        "product_name = \"Config App\"\ndist = \"out\"\n",
    )
    .expect("write config");
    fs::write(work.path().join("bitcoin_compiler.spec"), "# spec\n").expect("write spec");
    // The bundle lands where the --dist flag says, not where the file says;
    // the product name comes from the file.
    write_stub(
        bin.path(),
        "pyinstaller",
        &pyinstaller_stub(Some(("out2/Config App.app", Some("ConfigApp"), PLIST_VISIBLE))),
    );

    packager(work.path(), bin.path())
        .args(["--dist", "out2", "--no-launch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config App.app"))
        .stdout(predicate::str::contains("Executable present"));
}

#[test]
fn conflicting_launch_flags_are_rejected() {
    let work = TempDir::new().expect("work dir");
    let bin = TempDir::new().expect("bin dir");

    packager(work.path(), bin.path())
        .args(["--launch", "--no-launch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

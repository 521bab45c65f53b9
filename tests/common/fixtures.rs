//! Fake npm and node programs for integration tests

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// npm stand-in: `-v` prints a version, `install` writes three files per
/// package (one of them in a `test/` directory), `root -g` fails.
const FAKE_NPM: &str = r#"#!/bin/sh
case "$1" in
  -v) echo "10.2.4" ;;
  install)
    shift
    for pkg in "$@"; do
      mkdir -p "node_modules/$pkg/test"
      printf 'module.exports = 1;\n' > "node_modules/$pkg/index.js"
      printf '# readme\n' > "node_modules/$pkg/README.md"
      printf 'ok\n' > "node_modules/$pkg/test/index.js"
    done
    ;;
  *) exit 1 ;;
esac
"#;

/// node stand-in for the ModClean bridge: removes every README.md, records
/// the options it received next to the workspace and reports events.
const FAKE_NODE: &str = r#"#!/bin/sh
printf '%s' "$MODCLEAN_BENCHMARK_OPTIONS" > ../bridge-options.json
echo '{"event":"versions","modclean":"3.0.0-beta.1","node":"20.11.1"}'
echo 'stray console output'
rm -f node_modules/*/README.md
echo '{"event":"file:list","files":[{"path":"node_modules/a/README.md","dir":false},{"path":"node_modules/b/README.md","dir":false}]}'
echo '{"event":"emptydir:list","dirs":[]}'
echo '{"event":"file:skipped","name":"left-pad","isModule":true}'
"#;

/// npm stand-in whose install is rejected by the registry
const REJECTING_NPM: &str = r#"#!/bin/sh
case "$1" in
  -v) echo "10.2.4" ;;
  install)
    echo "npm ERR! 404 Not Found - GET https://registry.npmjs.org/$2" >&2
    exit 1
    ;;
  *) exit 1 ;;
esac
"#;

/// node stand-in whose ModClean run fails
const FAILING_NODE: &str = r#"#!/bin/sh
echo '{"event":"versions","modclean":"3.0.0","node":"20.11.1"}'
echo '{"event":"error","message":"EACCES: permission denied"}'
exit 1
"#;

/// Temporary launch directory with fake tool scripts
pub struct Sandbox {
    /// Directory the binary is launched from
    pub dir: TempDir,
    /// Holds the fake programs, outside the launch directory
    pub bin: TempDir,
}

impl Sandbox {
    /// Create a sandbox with working fake npm and node
    pub fn new() -> anyhow::Result<Self> {
        let sandbox = Self {
            dir: TempDir::new()?,
            bin: TempDir::new()?,
        };
        sandbox.script("npm", FAKE_NPM)?;
        sandbox.script("node", FAKE_NODE)?;
        sandbox.script("failing-node", FAILING_NODE)?;
        sandbox.script("rejecting-npm", REJECTING_NPM)?;
        Ok(sandbox)
    }

    /// Path of a fake program
    pub fn program(&self, name: &str) -> PathBuf {
        self.bin.path().join(name)
    }

    /// Launch directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn script(&self, name: &str, body: &str) -> anyhow::Result<()> {
        let path = self.program(name);
        fs::write(&path, body)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(())
    }
}

//! Scaffold orchestrator.
//!
//! One [`Generator::run`] call executes three phases in order: writing (all
//! template operations), install (dependency installer plus the two crank
//! registration calls), and the closing banner. Every file write completes
//! before any subprocess is spawned, and each subprocess blocks the next, so
//! the whole run is strictly sequential. Any failure aborts the run with no
//! rollback.

pub mod fs;
pub mod process;
pub mod profile;

use crate::config::{DerivedIdentifiers, GenerateOptions};
use crate::template::RenderContext;
use anyhow::Result;
use self::fs::ScaffoldFs;
use self::process::ProcessRunner;
use self::profile::{Op, Profile, RenderMode, profile_for};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Shown in the closing banner when no machine name was derived.
pub const MACHINE_NAME_FALLBACK: &str = "<org>/<cog-name>";

/// Minimum width of a step banner's divider lines.
const BANNER_MIN_WIDTH: usize = 80;

/// A single scaffolding run.
pub struct Generator<'a> {
    options: GenerateOptions,
    derived: DerivedIdentifiers,
    template_root: PathBuf,
    destination: PathBuf,
    fs: &'a mut dyn ScaffoldFs,
    runner: &'a mut dyn ProcessRunner,
    out: &'a mut dyn Write,
}

impl<'a> Generator<'a> {
    pub fn new(
        options: GenerateOptions,
        template_root: PathBuf,
        destination: PathBuf,
        fs: &'a mut dyn ScaffoldFs,
        runner: &'a mut dyn ProcessRunner,
        out: &'a mut dyn Write,
    ) -> Self {
        // Identifiers are derived once, before any file operation.
        let derived = DerivedIdentifiers::from_options(&options);
        Self {
            options,
            derived,
            template_root,
            destination,
            fs,
            runner,
            out,
        }
    }

    /// Run all phases. Returns on the first failure.
    pub fn run(&mut self) -> Result<()> {
        self.writing()?;
        self.install()?;
        self.end()
    }

    /// Phase 1: copy and render every template into the destination.
    fn writing(&mut self) -> Result<()> {
        self.banner("Scaffolding Cog")?;
        tracing::info!(
            language = %self.options.language,
            destination = %self.destination.display(),
            "writing project files"
        );

        let context = self.render_context()?;

        // The protocol definition lands in proto/ regardless of language.
        self.fs.copy_file(
            &self.template_root.join("proto/cog.proto"),
            &self.destination.join("proto/cog.proto"),
        )?;

        if self.options.include_mit_license {
            self.render_into(
                &self.template_root.join("templates/LICENSE.mit"),
                &self.destination.join("LICENSE"),
                &context,
            )?;
        }

        let profile = profile_for(self.options.language);
        for op in profile.ops(&self.options) {
            self.apply(&op, &context)?;
        }

        Ok(())
    }

    /// Phase 2: run the dependency installer, then register with crank.
    fn install(&mut self) -> Result<()> {
        self.banner("Loading Cog Dependencies")?;

        let profile: Profile = profile_for(self.options.language);
        tracing::info!(installer = profile.installer.program, "installing dependencies");
        self.runner.run(
            profile.installer.program,
            profile.installer.args,
            &self.destination,
        )?;

        let machine_name = self.derived.machine_name.clone().unwrap_or_default();
        let start_command = profile.start_command;

        self.banner(&format!(
            "$ crank cog:install --source=local {} --local-start-command \"{}\" --debug",
            machine_name, start_command
        ))?;
        writeln!(self.out)?;
        self.runner.run(
            "crank",
            &[
                "cog:install",
                "--source=local",
                &machine_name,
                "--local-start-command",
                start_command,
                "--debug",
            ],
            &self.destination,
        )?;

        self.banner(&format!("$ crank cog:readme {}", machine_name))?;
        writeln!(self.out)?;
        self.runner
            .run("crank", &["cog:readme", &machine_name], &self.destination)?;

        Ok(())
    }

    /// Phase 3: closing instruction.
    fn end(&mut self) -> Result<()> {
        let machine_name = self
            .derived
            .machine_name
            .as_deref()
            .unwrap_or(MACHINE_NAME_FALLBACK);
        self.banner(&format!(
            "All Done! Try It Out:  $ crank cog:step {}",
            machine_name
        ))
    }

    /// Apply one profile operation, resolving paths against the roots.
    fn apply(&mut self, op: &Op, context: &RenderContext) -> Result<()> {
        match op {
            Op::CopyFile { src, dest, mode } => {
                let src = self.template_root.join(src);
                let dest = self.destination.join(dest);
                match mode {
                    RenderMode::Verbatim => self.fs.copy_file(&src, &dest),
                    RenderMode::Template => self.render_into(&src, &dest, context),
                }
            }
            Op::CopyDir { src, dest } => self
                .fs
                .copy_dir(&self.template_root.join(src), &self.destination.join(dest)),
            Op::WriteFile { dest, contents } => {
                self.fs.write_file(&self.destination.join(dest), contents)
            }
        }
    }

    /// Render a template file into the destination.
    fn render_into(&mut self, src: &Path, dest: &Path, context: &RenderContext) -> Result<()> {
        let template = self.fs.read_to_string(src)?;
        self.fs.write_file(dest, &context.render(&template))
    }

    fn render_context(&self) -> Result<RenderContext> {
        let mut context = RenderContext::new();
        context.extend_from(&self.options)?;
        context.extend_from(&self.derived)?;
        Ok(context)
    }

    /// Print a step banner: the text between two `=` divider lines at least
    /// 80 columns wide, preceded by a blank line.
    fn banner(&mut self, text: &str) -> Result<()> {
        let width = text.chars().count().max(BANNER_MIN_WIDTH);
        let divider = "=".repeat(width);
        writeln!(self.out)?;
        writeln!(self.out, "{}", divider)?;
        writeln!(self.out, "{}", text)?;
        writeln!(self.out, "{}", divider)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use anyhow::bail;
    use pretty_assertions::assert_eq;

    /// In-memory [`ScaffoldFs`] that records operations in order.
    #[derive(Default)]
    struct RecordingFs {
        log: Vec<String>,
    }

    impl ScaffoldFs for RecordingFs {
        fn copy_file(&mut self, src: &Path, dest: &Path) -> Result<()> {
            self.log
                .push(format!("copy {} -> {}", src.display(), dest.display()));
            Ok(())
        }

        fn copy_dir(&mut self, src: &Path, dest: &Path) -> Result<()> {
            self.log
                .push(format!("copydir {} -> {}", src.display(), dest.display()));
            Ok(())
        }

        fn read_to_string(&self, path: &Path) -> Result<String> {
            Ok(format!("template({{{{package_safe_name}}}}) from {}", path.display()))
        }

        fn write_file(&mut self, dest: &Path, contents: &str) -> Result<()> {
            self.log
                .push(format!("write {} = {}", dest.display(), contents));
            Ok(())
        }
    }

    /// [`ProcessRunner`] that records invocations and optionally fails.
    #[derive(Default)]
    struct FakeRunner {
        invocations: Vec<String>,
        cwds: Vec<PathBuf>,
        fail_on: Option<String>,
    }

    impl ProcessRunner for FakeRunner {
        fn run(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
            self.invocations
                .push(format!("{} {}", program, args.join(" ")));
            self.cwds.push(cwd.to_path_buf());
            if self.fail_on.as_deref() == Some(program) {
                bail!("'{}' exited with exit status: 1", program);
            }
            Ok(())
        }
    }

    fn options(name: Option<&str>, org: Option<&str>) -> GenerateOptions {
        GenerateOptions {
            name: name.map(String::from),
            org: org.map(String::from),
            language: Language::Typescript,
            include_mit_license: false,
            include_example_step: false,
        }
    }

    fn run_generator(
        options: GenerateOptions,
        fs: &mut RecordingFs,
        runner: &mut FakeRunner,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        let mut generator = Generator::new(
            options,
            PathBuf::from("/templates"),
            PathBuf::from("/dest"),
            fs,
            runner,
            out,
        );
        generator.run()
    }

    #[test]
    fn test_banner_pads_to_80_columns() {
        let mut fs = RecordingFs::default();
        let mut runner = FakeRunner::default();
        let mut out = Vec::new();
        {
            let mut generator = Generator::new(
                options(None, None),
                PathBuf::from("/t"),
                PathBuf::from("/d"),
                &mut fs,
                &mut runner,
                &mut out,
            );
            generator.banner("short").unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(80));
        assert_eq!(lines[2], "short");
        assert_eq!(lines[3], "=".repeat(80));
    }

    #[test]
    fn test_banner_grows_with_long_text() {
        let mut fs = RecordingFs::default();
        let mut runner = FakeRunner::default();
        let mut out = Vec::new();
        let long = "x".repeat(90);
        {
            let mut generator = Generator::new(
                options(None, None),
                PathBuf::from("/t"),
                PathBuf::from("/d"),
                &mut fs,
                &mut runner,
                &mut out,
            );
            generator.banner(&long).unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1].len(), 90);
        assert_eq!(lines[3].len(), 90);
    }

    #[test]
    fn test_proto_copied_before_profile_ops() {
        let mut fs = RecordingFs::default();
        let mut runner = FakeRunner::default();
        let mut out = Vec::new();
        run_generator(options(Some("Widget"), None), &mut fs, &mut runner, &mut out).unwrap();

        assert_eq!(fs.log[0], "copy /templates/proto/cog.proto -> /dest/proto/cog.proto");
        assert!(fs.log.len() > 1);
    }

    #[test]
    fn test_license_rendered_only_when_requested() {
        let mut runner = FakeRunner::default();
        let mut out = Vec::new();

        let mut without = RecordingFs::default();
        run_generator(options(Some("W"), None), &mut without, &mut runner, &mut out).unwrap();
        assert!(!without.log.iter().any(|line| line.contains("/dest/LICENSE")));

        let mut with = RecordingFs::default();
        let mut opts = options(Some("W"), None);
        opts.include_mit_license = true;
        run_generator(opts, &mut with, &mut runner, &mut out).unwrap();
        // License lands right after the proto copy, before profile ops.
        assert!(with.log[1].starts_with("write /dest/LICENSE = "));
    }

    #[test]
    fn test_subprocess_order_and_arguments() {
        let mut fs = RecordingFs::default();
        let mut runner = FakeRunner::default();
        let mut out = Vec::new();
        run_generator(
            options(Some("Widget Maker"), Some("Acme Corp")),
            &mut fs,
            &mut runner,
            &mut out,
        )
        .unwrap();

        assert_eq!(
            runner.invocations,
            vec![
                "npm install",
                "crank cog:install --source=local acme-corp/widget-maker \
                 --local-start-command npm start --debug",
                "crank cog:readme acme-corp/widget-maker",
            ]
        );
        // Every subprocess runs inside the generated project.
        assert_eq!(runner.cwds, vec![PathBuf::from("/dest"); 3]);
    }

    #[test]
    fn test_crank_gets_empty_machine_name_when_unset() {
        let mut fs = RecordingFs::default();
        let mut runner = FakeRunner::default();
        let mut out = Vec::new();
        run_generator(options(None, None), &mut fs, &mut runner, &mut out).unwrap();

        assert_eq!(
            runner.invocations[1],
            "crank cog:install --source=local  --local-start-command npm start --debug"
        );
        assert_eq!(runner.invocations[2], "crank cog:readme ");
    }

    #[test]
    fn test_installer_failure_stops_before_crank() {
        let mut fs = RecordingFs::default();
        let mut runner = FakeRunner {
            fail_on: Some("npm".into()),
            ..Default::default()
        };
        let mut out = Vec::new();
        let result = run_generator(options(Some("W"), None), &mut fs, &mut runner, &mut out);

        assert!(result.is_err());
        assert_eq!(runner.invocations, vec!["npm install"]);
    }

    #[test]
    fn test_crank_install_failure_stops_before_readme() {
        let mut fs = RecordingFs::default();
        let mut runner = FakeRunner {
            fail_on: Some("crank".into()),
            ..Default::default()
        };
        let mut out = Vec::new();
        let result = run_generator(options(Some("W"), None), &mut fs, &mut runner, &mut out);

        assert!(result.is_err());
        assert_eq!(runner.invocations.len(), 2, "readme call must not happen");
    }

    #[test]
    fn test_final_banner_uses_fallback_without_machine_name() {
        let mut fs = RecordingFs::default();
        let mut runner = FakeRunner::default();
        let mut out = Vec::new();
        run_generator(options(None, None), &mut fs, &mut runner, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!(
            "All Done! Try It Out:  $ crank cog:step {}",
            MACHINE_NAME_FALLBACK
        )));
    }

    #[test]
    fn test_final_banner_uses_machine_name() {
        let mut fs = RecordingFs::default();
        let mut runner = FakeRunner::default();
        let mut out = Vec::new();
        run_generator(
            options(Some("Widget Maker"), Some("Acme Corp")),
            &mut fs,
            &mut runner,
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("$ crank cog:step acme-corp/widget-maker"));
    }

    #[test]
    fn test_rendered_templates_substitute_context() {
        let mut fs = RecordingFs::default();
        let mut runner = FakeRunner::default();
        let mut out = Vec::new();
        run_generator(options(Some("Widget Maker"), None), &mut fs, &mut runner, &mut out)
            .unwrap();

        let package_json = fs
            .log
            .iter()
            .find(|line| line.starts_with("write /dest/package.json"))
            .expect("package.json must be written");
        assert!(
            package_json.contains("template(widget-maker)"),
            "placeholder not substituted: {}",
            package_json
        );
    }
}

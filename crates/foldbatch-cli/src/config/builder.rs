use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileProfiles, FileSeeds};
use super::models::AppConfig;
use crate::cli::GenerateArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use foldbatch::core::chem::ExplicitAtomCounter;
use foldbatch::core::io::cluster::read_cluster_config;
use foldbatch::core::io::screen::read_screen;
use foldbatch::core::models::compound::CompoundAxis;
use foldbatch::engine::config::{self as core_config, GenerationMode, KeyOrdering};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn build_config(args: &GenerateArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let input_path = args
        .input
        .clone()
        .or(file_config.input_file.take())
        .ok_or_else(|| required("input"))?;

    let generation = file_config.generation.take().unwrap_or_default();
    let cluster = file_config.cluster.take().unwrap_or_default();
    let screen = file_config.screen.take().unwrap_or_default();
    let output = file_config.output.take().unwrap_or_default();

    let mut builder = core_config::BatchConfigBuilder::new();

    let seeds = match (&args.seeds, generation.seeds) {
        (Some(raw), _) => Some(parse_seed_text(raw)?),
        (None, Some(FileSeeds::List(seeds))) => Some(seeds),
        (None, Some(FileSeeds::Text(raw))) => Some(parse_seed_text(&raw)?),
        (None, None) => None,
    };
    if let Some(seeds) = seeds {
        builder = builder.model_seeds(seeds);
    }

    let mode = match (args.mode, generation.mode) {
        (Some(mode), _) => Some(mode),
        (None, Some(raw)) => Some(
            raw.parse::<GenerationMode>()
                .map_err(|e| CliError::Config(e.to_string()))?,
        ),
        (None, None) => None,
    };
    if let Some(mode) = mode {
        builder = builder.mode(mode);
    }

    let sorting = match (args.sorting, generation.sorting) {
        (Some(sorting), _) => sorting,
        (None, Some(raw)) => raw
            .parse::<KeyOrdering>()
            .map_err(|e| CliError::Config(e.to_string()))?,
        (None, None) => defaults.sorting,
    };
    let strict_validation = if args.lenient {
        false
    } else {
        generation
            .strict_validation
            .unwrap_or(defaults.strict_validation)
    };
    let annotate_names = args.annotate_names
        || generation
            .annotate_names
            .unwrap_or(defaults.annotate_names);

    let cluster_path = args
        .cluster_config
        .clone()
        .or(cluster.config)
        .ok_or_else(|| required("cluster_config"))?;
    info!("Loading capacity tiers from {:?}", &cluster_path);
    let tiers = read_cluster_config(&cluster_path)?;
    builder = builder.tiers(tiers);

    let profiles = match (&args.gpu_profiles, cluster.profiles) {
        (Some(raw), _) => Some(parse_profile_text(raw)?),
        (None, Some(FileProfiles::List(names))) => Some(names),
        (None, Some(FileProfiles::Text(raw))) => Some(parse_profile_text(&raw)?),
        (None, None) => None,
    };
    if let Some(profiles) = profiles {
        builder = builder.tier_selection(profiles);
    }

    let mut excluded_compounds = 0;
    let max_atoms = args.max_compound_atoms.or(screen.max_compound_atoms);
    if let Some(screen_path) = args.screen_file.clone().or(screen.file) {
        info!("Loading compound screen from {:?}", &screen_path);
        let screen_file = read_screen(&screen_path)?;
        if !screen_file.skipped.is_empty() {
            warn!(
                "{} screen entries were skipped while loading {:?}",
                screen_file.skipped.len(),
                &screen_path
            );
        }
        let (axis, excluded) =
            CompoundAxis::from_screen(screen_file.entries, &ExplicitAtomCounter, max_atoms);
        info!(
            compounds = axis.len(),
            excluded, "Compound axis prepared."
        );
        excluded_compounds = excluded;
        builder = builder.compounds(axis);
    } else if max_atoms.is_some() {
        warn!("max-compound-atoms has no effect without a screen file.");
    }

    let monomer_root = args
        .monomer_root
        .clone()
        .or(file_config.monomer_root.take())
        .unwrap_or_else(|| PathBuf::from(&defaults.monomer_root));
    let output_root = args
        .output_root
        .clone()
        .or(output.root)
        .unwrap_or_else(|| PathBuf::from(&defaults.output_root));
    let run_id = args
        .run_id
        .clone()
        .or(output.run_id)
        .unwrap_or(defaults.run_id);

    builder = builder
        .ordering(sorting)
        .strict_validation(strict_validation)
        .annotate_names(annotate_names)
        .monomer_root(monomer_root)
        .output_root(output_root)
        .run_id(run_id);
    if let Some(store) = output.msa_store {
        builder = builder.msa_store(store);
    }
    if let Some(store) = output.template_store {
        builder = builder.template_store(store);
    }
    if let Some(extension) = output.extension {
        builder = builder.extension(extension);
    }

    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path,
        core_config,
        excluded_compounds,
    })
}

fn required(kind: &str) -> CliError {
    CliError::Config(format!(
        "A value for '{}' is required either in the config file or via CLI argument.",
        kind
    ))
}

fn parse_seed_text(raw: &str) -> Result<Vec<i64>> {
    parser::parse_seeds(raw).map_err(|e| CliError::Config(e.to_string()))
}

fn parse_profile_text(raw: &str) -> Result<Vec<String>> {
    parser::parse_profiles(raw).map_err(|e| CliError::Config(e.to_string()))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_assignment(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "generation.mode" => {
                config
                    .generation
                    .get_or_insert_with(Default::default)
                    .mode = Some(value_str.to_string());
            }
            "generation.sorting" => {
                config
                    .generation
                    .get_or_insert_with(Default::default)
                    .sorting = Some(value_str.to_string());
            }
            "generation.strict-validation" => {
                config
                    .generation
                    .get_or_insert_with(Default::default)
                    .strict_validation = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })?);
            }
            "screen.max-compound-atoms" => {
                config
                    .screen
                    .get_or_insert_with(Default::default)
                    .max_compound_atoms = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "output.root" => {
                config.output.get_or_insert_with(Default::default).root =
                    Some(PathBuf::from(value_str));
            }
            "output.run-id" => {
                config.output.get_or_insert_with(Default::default).run_id =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use foldbatch::core::models::compound::TokenCost;
    use std::fs;
    use std::path::Path;
    use tempfile::{TempDir, tempdir};

    fn setup_inputs() -> TempDir {
        let dir = tempdir().expect("create temp dir");
        fs::write(
            dir.path().join("cluster.json"),
            r#"{"large": {"max_tokens": 8192}, "small": 3072}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("screen.json"),
            r#"[{"ID": "ETOH", "SMILES": "CCO"}, {"ID": "C10", "SMILES": "CCCCCCCCCC"}, {"SMILES": "C"}]"#,
        )
        .unwrap();
        dir
    }

    fn base_args(dir: &Path) -> GenerateArgs {
        GenerateArgs {
            input: Some(dir.join("dims.json")),
            seeds: Some("1,2".to_string()),
            mode: Some(GenerationMode::Cartesian),
            cluster_config: Some(dir.join("cluster.json")),
            ..Default::default()
        }
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("run.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn build_config_with_cli_values_and_defaults_for_rest() {
        let dir = setup_inputs();
        let app = build_config(&base_args(dir.path())).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(app.input_path, dir.path().join("dims.json"));
        assert_eq!(cfg.model_seeds, vec![1, 2]);
        assert_eq!(cfg.mode, GenerationMode::Cartesian);
        assert_eq!(cfg.ordering, KeyOrdering::Input);
        assert!(cfg.strict_validation);
        assert!(!cfg.compounds.is_active());
        assert_eq!(cfg.monomer_root, PathBuf::from("monomer_data"));
        assert_eq!(cfg.output.run_dir(), PathBuf::from("pending_jobs/default"));
        let names: Vec<_> = cfg.tiers.tiers().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["small", "large"]);
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = setup_inputs();
        let config_path = write_config(
            dir.path(),
            &format!(
                r#"
                input-file = "from-file.json"
                monomer-root = "records"

                [generation]
                seeds = "7, 8"
                mode = "collapsed"
                sorting = "alpha"
                annotate-names = true

                [cluster]
                config = "{cluster}"
                profiles = ["large"]

                [screen]
                file = "{screen}"
                max-compound-atoms = 5

                [output]
                root = "out"
                run-id = "batch1"
                extension = "af3.json"
                "#,
                cluster = dir.path().join("cluster.json").display(),
                screen = dir.path().join("screen.json").display(),
            ),
        );
        let args = GenerateArgs {
            config: Some(config_path),
            ..Default::default()
        };

        let err = build_config(&args).err().expect("dotted extension is rejected");
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("extension")));

        let fixed = fs::read_to_string(dir.path().join("run.toml"))
            .unwrap()
            .replace("af3.json", "af3");
        let args = GenerateArgs {
            config: Some(write_config(dir.path(), &fixed)),
            ..Default::default()
        };
        let app = build_config(&args).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(app.input_path, PathBuf::from("from-file.json"));
        assert_eq!(cfg.model_seeds, vec![7, 8]);
        assert_eq!(cfg.mode, GenerationMode::Collapsed);
        assert_eq!(cfg.ordering, KeyOrdering::Alpha);
        assert!(cfg.annotate_names);
        assert_eq!(cfg.monomer_root, PathBuf::from("records"));
        assert_eq!(cfg.output.run_dir(), PathBuf::from("out/batch1"));
        assert_eq!(cfg.output.extension, "af3");
        assert_eq!(cfg.tiers.len(), 1);
        assert_eq!(cfg.tiers.tiers()[0].name, "large");
        assert_eq!(cfg.compounds.len(), 1);
        assert_eq!(app.excluded_compounds, 1);
        assert_eq!(
            cfg.compounds,
            CompoundAxis::Screen(vec![foldbatch::core::models::compound::Compound {
                id: "ETOH".to_string(),
                smiles: "CCO".to_string(),
                cost: TokenCost::Finite(3),
            }])
        );
    }

    #[test]
    fn cli_overrides_set_values_which_override_the_file() {
        let dir = setup_inputs();
        let config_path = write_config(
            dir.path(),
            r#"
            [generation]
            mode = "cartesian"
            sorting = "alpha"

            [output]
            run-id = "from-file"
            "#,
        );
        let mut args = base_args(dir.path());
        args.config = Some(config_path);
        args.mode = None;
        args.set_values = vec![
            "generation.mode=collapsed".to_string(),
            "generation.sorting=input".to_string(),
            "output.run-id=from-set".to_string(),
            "generation.strict-validation=false".to_string(),
        ];
        args.run_id = Some("from-cli".to_string());

        let cfg = build_config(&args).expect("build ok").core_config;
        assert_eq!(cfg.mode, GenerationMode::Collapsed);
        assert_eq!(cfg.ordering, KeyOrdering::Input);
        assert!(!cfg.strict_validation);
        assert_eq!(cfg.output.run_id, "from-cli");
    }

    #[test]
    fn invalid_inputs_are_configuration_errors() {
        let dir = setup_inputs();

        let mut args = base_args(dir.path());
        args.seeds = Some("1,x".to_string());
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let mut args = base_args(dir.path());
        args.gpu_profiles = Some("huge".to_string());
        let err = build_config(&args).err().unwrap();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("huge")));

        let mut args = base_args(dir.path());
        args.seeds = None;
        let err = build_config(&args).err().unwrap();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("model_seeds")));

        let mut args = base_args(dir.path());
        args.set_values = vec!["optimization.num-solutions=3".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let mut args = base_args(dir.path());
        args.cluster_config = None;
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }
}

//! Subcommand implementations
//!
//! Each command reads its inputs, drives `scaffold_ids`, and writes JSON.
//! All identity logic stays in the library.

use anyhow::{Context, Result};
use scaffold_telemetry::log_event;

use scaffold_ids::{
    scaffold_frequency, stable_composite_label, Alphabet, Dataset, DuplicateKeyPolicy,
    IdentityApi, IdentityConfig, IdentityConfigBuilder, IdentityService, LabelConfig,
    LabeledRecord, StableCollisionPolicy, StdRandomSource, Strategy,
};

use crate::cli::{AssignArgs, ColumnArgs, Command, ExtrapolateArgs, FrequencyArgs, IdArgs};
use crate::io::{read_dataset, write_json};

/// Execute a parsed command line
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Assign(args) => assign(args),
        Command::Extrapolate(args) => extrapolate(args),
        Command::Frequency(args) => frequency(args),
    }
}

fn build_service(
    columns: &ColumnArgs,
    ids: &IdArgs,
    duplicate_keys: DuplicateKeyPolicy,
    stable_collisions: StableCollisionPolicy,
) -> Result<IdentityService> {
    let config = IdentityConfigBuilder::new()
        .key_column(columns.key_column.as_str())
        .id_column(columns.id_column.as_str())
        .alphabet(Alphabet::new(&ids.alphabet)?)
        .duplicate_keys(duplicate_keys)
        .stable_collisions(stable_collisions)
        .build()?;
    Ok(IdentityService::new(config, StdRandomSource::from_seed(ids.seed))?)
}

fn assign(args: AssignArgs) -> Result<()> {
    let strategy: Strategy = args.ids.strategy.parse()?;
    let mut service = build_service(
        &args.columns,
        &args.ids,
        DuplicateKeyPolicy::default(),
        StableCollisionPolicy::default(),
    )?;
    let dataset = read_dataset(&args.input)?;

    let annotated = service
        .assign_ids(&dataset, strategy, args.ids.length)
        .context("assigning identifiers")?;
    write_json(args.output.as_deref(), &annotated)?;

    log_event!(
        info,
        "assign",
        "Assigned scaffold identifiers",
        rows = annotated.len(),
        strategy = %strategy
    );
    Ok(())
}

fn extrapolate(args: ExtrapolateArgs) -> Result<()> {
    let strategy: Strategy = args.ids.strategy.parse()?;
    let policy: DuplicateKeyPolicy = args.duplicate_keys.parse()?;
    let collisions: StableCollisionPolicy = args.stable_collisions.parse()?;
    let mut service = build_service(&args.columns, &args.ids, policy, collisions)?;
    let existing = read_dataset(&args.registry)?;
    let new_rows = read_dataset(&args.input)?;

    let annotated = service
        .extrapolate_ids(&existing, &new_rows, strategy, args.ids.length)
        .context("extrapolating identifiers")?;
    write_json(args.output.as_deref(), &annotated)?;

    if let Some(path) = args.merged_output.as_deref() {
        write_json(Some(path), &merge(&existing, &annotated))?;
    }

    let snapshot = service.metrics().snapshot();
    log_event!(
        info,
        "extrapolate",
        "Extrapolated scaffold identifiers",
        rows = annotated.len(),
        reused = snapshot.identifiers_reused,
        minted = snapshot.identifiers_minted,
        stable_collisions = snapshot.stable_collisions
    );
    if snapshot.stable_collisions > 0 {
        log_event!(
            warn,
            "extrapolate",
            "Stable identifiers collided with existing ones; consider a longer --length",
            collisions = snapshot.stable_collisions
        );
    }
    Ok(())
}

/// Registry rows followed by the newly annotated rows
pub fn merge(existing: &Dataset, annotated: &Dataset) -> Dataset {
    let mut records = existing.to_records();
    records.extend(annotated.to_records());
    Dataset::from_records(records)
}

fn frequency(args: FrequencyArgs) -> Result<()> {
    let dataset = read_dataset(&args.input)?;
    let table = scaffold_frequency(&dataset, &args.key_column, args.keep_absent, args.top)
        .context("building frequency table")?;

    let counted_rows: u64 = table.iter().map(|r| r.amount).sum();
    log_event!(
        info,
        "frequency",
        "Scaffold frequency table built",
        unique_scaffolds = table.len(),
        counted_rows
    );

    if args.stable_labels {
        let labeled: Vec<LabeledRecord> = table
            .into_iter()
            .map(|record| {
                let label = stable_composite_label(&record, args.suffix_length);
                LabeledRecord { record, label }
            })
            .collect();
        write_json(args.output.as_deref(), &labeled)
    } else if args.labels {
        let label_config = LabelConfig {
            suffix_length: args.suffix_length,
            ..LabelConfig::default()
        };
        let mut service =
            IdentityService::new(IdentityConfig::default(), StdRandomSource::from_seed(args.seed))?
                .with_label_config(label_config);
        let labeled = service.label_frequency_table(&table);
        write_json(args.output.as_deref(), &labeled)
    } else {
        write_json(args.output.as_deref(), &table)
    }
}

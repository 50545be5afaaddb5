use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, info_span, trace};

use encounter_cli::logging::redact_value;
use encounter_cli::resolve_output_path;
use encounter_ingest::{IngestOptions, read_raw_table};
use encounter_model::{QuestionField, QuestionMap, load_question_map};
use encounter_output::write_encounters_csv_file;
use encounter_transform::process_encounter_data;

use crate::cli::{ProcessArgs, QuestionsArgs};
use crate::summary::apply_table_style;
use crate::types::ProcessResult;

pub fn run_questions(args: &QuestionsArgs) -> Result<()> {
    let questions = question_map(args.question_map.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec!["Field", "Question text"]);
    apply_table_style(&mut table);
    for field in QuestionField::ALL {
        table.add_row(vec![field.key().to_string(), questions.texts(field).join("\n")]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let span = info_span!("process", input = %args.input.display());
    let _guard = span.enter();

    let questions = question_map(args.question_map.as_deref())?;

    let ingest_start = Instant::now();
    let raw = read_raw_table(&args.input, &IngestOptions::default())
        .with_context(|| format!("read {}", args.input.display()))?;
    info!(
        rows = raw.height(),
        columns = raw.width(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let table = process_encounter_data(&raw, &questions).context("transform encounters")?;
    for row in &table.rows {
        trace!(
            patient_id = redact_value(row.patient_id.as_deref().unwrap_or_default()),
            patient_number = ?row.patient_number,
            encounter = ?row.encounter,
            days_between_encounter = row.days_between_encounter,
            "encounter"
        );
    }

    let output = if args.dry_run {
        debug!("dry run, skipping csv export");
        None
    } else {
        let path = resolve_output_path(&args.input, args.output.as_deref());
        let output_start = Instant::now();
        write_encounters_csv_file(&path, &table.rows)
            .with_context(|| format!("write {}", path.display()))?;
        debug!(
            duration_ms = output_start.elapsed().as_millis(),
            "csv export complete"
        );
        Some(path)
    };

    Ok(ProcessResult {
        input: args.input.clone(),
        output,
        raw_row_count: raw.height(),
        table,
        preview_rows: args.preview,
    })
}

fn question_map(path: Option<&std::path::Path>) -> Result<QuestionMap> {
    match path {
        Some(path) => {
            let questions = load_question_map(path)
                .with_context(|| format!("load question map {}", path.display()))?;
            debug!(path = %path.display(), "question map loaded");
            Ok(questions)
        }
        None => Ok(QuestionMap::default()),
    }
}

//! grasshopper compare - Order two versions

use std::cmp::Ordering;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, json_ok};
use crate::error::Result;
use crate::version::{Version, is_newer};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Version that might be newer (a leading `v` is ignored)
    pub candidate: String,

    /// Version to compare against (a leading `v` is ignored)
    pub reference: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Relation {
    Newer,
    Equal,
    Older,
}

#[derive(Debug, Serialize)]
struct CompareReport {
    candidate: String,
    reference: String,
    relation: Relation,
    candidate_is_newer: bool,
}

pub fn run(ctx: &AppContext, args: &CompareArgs) -> Result<()> {
    let candidate = parse_tag(&args.candidate)?;
    let reference = parse_tag(&args.reference)?;

    let report = CompareReport {
        candidate: candidate.to_string(),
        reference: reference.to_string(),
        relation: relation(&candidate, &reference),
        candidate_is_newer: is_newer(&candidate, &reference),
    };

    match ctx.output_format {
        OutputFormat::Json => emit_json(&json_ok(&report)),
        format => {
            let verdict = match report.relation {
                Relation::Newer => "is newer than",
                Relation::Equal => "is the same version as",
                Relation::Older => "is older than",
            };
            let mut layout = HumanLayout::new(format);
            layout.push_line(format!(
                "{} {verdict} {}",
                report.candidate, report.reference
            ));
            emit_human(layout);
            Ok(())
        }
    }
}

fn parse_tag(text: &str) -> Result<Version> {
    Ok(Version::parse(text.strip_prefix('v').unwrap_or(text))?)
}

fn relation(candidate: &Version, reference: &Version) -> Relation {
    match candidate.cmp(reference) {
        Ordering::Greater => Relation::Newer,
        Ordering::Equal => Relation::Equal,
        Ordering::Less => Relation::Older,
    }
}

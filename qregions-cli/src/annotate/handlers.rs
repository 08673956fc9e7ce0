use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};

use qregions::core::utils::{get_dynamic_reader_w_stdin, get_dynamic_writer_w_stdout};
use qregions::io::VcfReader;
use qregions::{LoadOptions, QuantifyRegions, VariantRecord};

use super::cli::STDIO;

/// Refresh the spinner every this many records.
const PROGRESS_EVERY: u64 = 10_000;

pub fn run_annotate(matches: &ArgMatches) -> Result<()> {
    let specs: Vec<&String> = matches
        .get_many::<String>("regions")
        .context("At least one region file is required.")?
        .collect();

    let stdio = STDIO.to_string();
    let input = matches.get_one::<String>("input").unwrap_or(&stdio);
    let output = matches.get_one::<String>("output").unwrap_or(&stdio);
    let quiet = matches.get_flag("quiet");
    let options = LoadOptions {
        fix_chr: matches.get_flag("fixchr"),
    };

    let mut regions = QuantifyRegions::new();
    regions.load(&specs, &options)?;

    let annotated = annotate_vcf(&mut regions, input, output, quiet)?;
    log::info!("Annotated {annotated} records");

    Ok(())
}

fn progress_bar(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg} ({pos} records)")?,
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}

///
/// Stream the VCF at `input` to `output`, setting the Regions INFO field of every record.
/// Returns the number of records written.
///
pub fn annotate_vcf(
    regions: &mut QuantifyRegions,
    input: &str,
    output: &str,
    quiet: bool,
) -> Result<u64> {
    let reader = get_dynamic_reader_w_stdin(input)
        .with_context(|| format!("Failed to open VCF {input}"))?;
    let mut vcf = VcfReader::new(reader).context("Failed to read VCF header")?;
    vcf.header_mut().ensure_regions_info();

    let mut writer = get_dynamic_writer_w_stdout(output)
        .with_context(|| format!("Failed to create {output}"))?;
    vcf.header().write(&mut writer)?;

    let pb = progress_bar(quiet)?;
    pb.set_message("Annotating");

    let mut written = 0u64;
    for record in vcf {
        let mut record = record?;
        regions.annotate(&mut record)?;
        writeln!(writer, "{record}")?;

        written += 1;
        if written % PROGRESS_EVERY == 0 {
            pb.set_position(written);
            pb.set_message(format!("At {}:{}", record.chrom(), record.pos()));
        }
    }

    writer.flush()?;
    pb.finish_and_clear();

    Ok(written)
}

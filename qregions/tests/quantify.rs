use std::io::{Cursor, Write};
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::*;

use qregions::core::utils::get_dynamic_reader;
use qregions::io::{VcfReader, VcfRecord};
use qregions::{LoadOptions, QuantifyError, QuantifyRegions, VariantRecord};

fn get_test_path(file_name: &str) -> PathBuf {
    std::env::current_dir()
        .unwrap()
        .join("../tests/data")
        .join(file_name)
}

#[fixture]
fn region_specs() -> Vec<String> {
    vec![
        format!("CONF:{}", get_test_path("regions/conf.bed").display()),
        get_test_path("regions/FP.bed").display().to_string(),
        get_test_path("regions/hard.bed.gz").display().to_string(),
    ]
}

#[fixture]
fn path_to_vcf() -> PathBuf {
    get_test_path("vcf/calls.vcf")
}

fn annotate_vcf(regions: &mut QuantifyRegions, vcf: &PathBuf) -> Vec<String> {
    let reader = get_dynamic_reader(vcf).unwrap();
    let mut vcf = VcfReader::new(reader).unwrap();
    vcf.header_mut().ensure_regions_info();

    let mut out = Vec::new();
    vcf.header().write(&mut out).unwrap();
    for record in vcf {
        let mut record = record.unwrap();
        regions.annotate(&mut record).unwrap();
        writeln!(out, "{record}").unwrap();
    }

    String::from_utf8(out)
        .unwrap()
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| line.split('\t').nth(7).unwrap().to_string())
        .collect()
}

#[rstest]
fn test_load_reports(region_specs: Vec<String>) {
    let mut regions = QuantifyRegions::new();
    let reports = regions
        .load(&region_specs, &LoadOptions { fix_chr: true })
        .unwrap();

    let summary: Vec<(&str, usize, usize)> = reports
        .iter()
        .map(|r| (r.label.as_str(), r.accepted, r.skipped))
        .collect();
    assert_eq!(summary, vec![("CONF", 3, 0), ("FP", 3, 0), ("hard", 3, 0)]);
}

#[rstest]
fn test_region_sizes(region_specs: Vec<String>) {
    let mut regions = QuantifyRegions::new();
    regions
        .load(&region_specs, &LoadOptions { fix_chr: true })
        .unwrap();

    assert_eq!(
        regions.region_sizes(),
        vec![
            ("CONF", 1110),
            ("FP", 30),
            ("FP_typeA", 10),
            ("FP_typeB", 10),
            ("hard", 111),
            ("hard_lowcomplexity", 11),
            ("hard_segdup", 100),
        ]
    );
    assert_eq!(regions.region_size("TP"), 0);
    assert!(!regions.has_regions("TP"));
}

#[rstest]
fn test_annotate_vcf(region_specs: Vec<String>, path_to_vcf: PathBuf) {
    let mut regions = QuantifyRegions::new();
    regions
        .load(&region_specs, &LoadOptions { fix_chr: true })
        .unwrap();

    assert_eq!(
        annotate_vcf(&mut regions, &path_to_vcf),
        vec![
            "DP=12",
            "DP=20;Regions=CONF,FP,FP_typeA,hard,hard_lowcomplexity",
            "DP=15;Regions=FP,FP_typeA",
            "DP=9;Regions=CONF,FP,FP_typeB",
            "SVTYPE=DEL;END=550;Regions=FP,hard,hard_segdup",
            "Regions=CONF",
            "DP=3",
        ]
    );
}

#[rstest]
fn test_annotate_without_fix_chr(region_specs: Vec<String>, path_to_vcf: PathBuf) {
    let mut regions = QuantifyRegions::new();
    regions.load(&region_specs, &LoadOptions::default()).unwrap();

    // the gzipped file names its second chromosome "2", which no record uses
    assert_eq!(regions.region_size("hard_lowcomplexity"), 11);
    assert_eq!(annotate_vcf(&mut regions, &path_to_vcf)[5], "Regions=CONF");
}

#[rstest]
fn test_header_gets_regions_info(path_to_vcf: PathBuf) {
    let reader = get_dynamic_reader(&path_to_vcf).unwrap();
    let mut vcf = VcfReader::new(reader).unwrap();
    vcf.header_mut().ensure_regions_info();

    let lines = &vcf.header().lines;
    assert_eq!(lines.len(), 6);
    assert!(lines[4].starts_with("##INFO=<ID=Regions,"));
    assert!(lines[5].starts_with("#CHROM"));
}

#[rstest]
fn test_unsorted_vcf_is_an_error(region_specs: Vec<String>) {
    let mut regions = QuantifyRegions::new();
    regions.load(&region_specs, &LoadOptions::default()).unwrap();

    let vcf = "##fileformat=VCFv4.2\n\
               #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
               chr1\t19\t.\tA\tG\t.\tPASS\t.\n\
               chr1\t6\t.\tA\tG\t.\tPASS\t.\n";
    let mut records = VcfReader::new(Cursor::new(vcf)).unwrap();

    let mut first = records.next().unwrap().unwrap();
    regions.annotate(&mut first).unwrap();

    let mut second = records.next().unwrap().unwrap();
    let err = regions.annotate(&mut second).unwrap_err();
    assert!(matches!(err, QuantifyError::OutOfOrder { pos: 5, .. }));
    assert_eq!(err.to_string(), "Variants out of order at chr1:5");
}

#[rstest]
#[case("FP:/no/such/file.bed")]
#[case(":fp.bed")]
#[case("")]
fn test_load_errors(#[case] spec: &str) {
    let mut regions = QuantifyRegions::new();
    assert!(regions.load(&[spec], &LoadOptions::default()).is_err());
}

#[rstest]
fn test_late_load_is_rejected(region_specs: Vec<String>) {
    let mut regions = QuantifyRegions::new();
    regions.load(&region_specs[..1], &LoadOptions::default()).unwrap();
    regions.regions_at("chr1", 18, 18).unwrap();

    let err = regions
        .load(&region_specs[1..2], &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, QuantifyError::Index(_)));
}

struct Call {
    chrom: String,
    start: i64,
    end: i64,
    regions: Option<String>,
}

impl VariantRecord for Call {
    fn chrom(&self) -> &str {
        &self.chrom
    }

    fn ref_span(&self) -> (i64, i64) {
        (self.start, self.end)
    }

    fn set_regions(&mut self, regions: Option<&str>) {
        self.regions = regions.map(String::from);
    }
}

#[rstest]
#[case(7)]
#[case(1234)]
fn test_random_stream_matches_brute_force(#[case] seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let tempdir = tempfile::tempdir().unwrap();

    // (label, chrom, start, inclusive end, tag)
    let mut truth: Vec<(String, String, i64, i64, Option<String>)> = Vec::new();
    let mut specs = Vec::new();
    for label in ["A", "B", "CONF"] {
        let path = tempdir.path().join(format!("{label}.bed"));
        let mut file = std::fs::File::create(&path).unwrap();
        for _ in 0..2_000 {
            let chrom = if rng.random_bool(0.5) { "chr1" } else { "chr2" };
            let start = rng.random_range(0..100_000);
            let end = start + rng.random_range(1..400);
            let tag = if rng.random_bool(0.3) { Some("x".to_string()) } else { None };
            match &tag {
                Some(tag) => writeln!(file, "{chrom}\t{start}\t{end}\t{tag}").unwrap(),
                None => writeln!(file, "{chrom}\t{start}\t{end}").unwrap(),
            }
            truth.push((label.to_string(), chrom.to_string(), start, end - 1, tag));
        }
        specs.push(format!("{label}:{}", path.display()));
    }

    let mut regions = QuantifyRegions::new();
    regions.load(&specs, &LoadOptions::default()).unwrap();

    for chrom in ["chr1", "chr2"] {
        let mut starts: Vec<i64> = (0..3_000).map(|_| rng.random_range(0..101_000)).collect();
        starts.sort_unstable();

        for start in starts {
            let end = start + rng.random_range(0..50);
            let mut call = Call {
                chrom: chrom.to_string(),
                start,
                end,
                regions: None,
            };
            regions.annotate(&mut call).unwrap();

            let mut expected: Vec<String> = truth
                .iter()
                .filter(|(_, c, s, e, _)| c == chrom && *s <= end && *e >= start)
                .flat_map(|(label, _, _, _, tag)| {
                    let composite = match tag {
                        Some(tag) if label != "CONF" => Some(format!("{label}_{tag}")),
                        _ => None,
                    };
                    std::iter::once(label.clone()).chain(composite)
                })
                .collect();
            expected.sort();
            expected.dedup();

            let expected = (!expected.is_empty()).then(|| expected.join(","));
            assert_eq!(call.regions, expected, "{chrom}:{start}-{end}");
        }
    }

    // everything on chr1 and chr2 below the last query has been dropped
    let resident = regions.index().resident();
    assert!(resident < 200, "{resident} intervals still resident");
}

#[rstest]
fn test_vcf_record_round_trip_keeps_other_columns() {
    let line = "chr2\t10\trs1\tG\tA\t50\tPASS\t.\tGT:DP\t0/1:30";
    let mut regions = QuantifyRegions::new();
    let mut record: VcfRecord = line.parse().unwrap();
    regions.annotate(&mut record).unwrap();
    assert_eq!(record.to_string(), line);
}

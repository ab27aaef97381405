use sysbar::platform::gpu::{parse_smi_output, parse_tegrastats_line};

#[test]
fn smi_output_parses_one_reading_per_line() {
    let output = "35, 1536, 8192\n0, 120, 4096\n";
    let readings = parse_smi_output(output);

    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].utilization, 35.0);
    assert_eq!(readings[0].memory_used_mb, 1536.0);
    assert_eq!(readings[0].memory_total_mb, 8192.0);
    assert_eq!(readings[1].utilization, 0.0);
}

#[test]
fn smi_malformed_line_is_skipped_not_fatal() {
    let output = "35, 1536, 8192\n[N/A], oops\n12, 256, 4096\n";
    let readings = parse_smi_output(output);

    assert_eq!(readings.len(), 2);
    assert_eq!(readings[1].utilization, 12.0);
}

#[test]
fn smi_non_numeric_fields_are_skipped() {
    let readings = parse_smi_output("[Not Supported], 1536, 8192\n");
    assert!(readings.is_empty());
}

#[test]
fn smi_empty_output_yields_no_readings() {
    assert!(parse_smi_output("").is_empty());
}

#[test]
fn tegrastats_line_matches_fixed_grammar() {
    let line = "RAM 1234/3964MB (lfb 2x4MB) SWAP 0/1982MB (cached 0MB) \
                CPU [14%@1428,10%@1428,0%@1428,0%@1428] EMC_FREQ 0% \
                GR3D_FREQ 45% PLL@37C CPU@39.5C";

    let reading = parse_tegrastats_line(line).unwrap();
    assert_eq!(reading.memory_used_mb, 1234.0);
    assert_eq!(reading.memory_total_mb, 3964.0);
    assert_eq!(reading.utilization, 45.0);
}

#[test]
fn tegrastats_unrelated_line_yields_nothing() {
    assert!(parse_tegrastats_line("no stats here").is_none());
    assert!(parse_tegrastats_line("RAM 10/20MB with no gpu field").is_none());
}

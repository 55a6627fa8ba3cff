use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn sasplot() -> Command {
    Command::cargo_bin("sasplot").unwrap()
}

#[test]
fn help_lists_both_chart_kinds() {
    sasplot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("iq").and(predicate::str::contains("iqxy")));
}

#[test]
fn iq_writes_svg_and_prints_nearest_readout() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("iq.dat");
    let out = dir.path().join("iq.svg");
    fs::write(&input, "# q I dI\n1 10 1\n2 20 3\n3 -5 1\n4 30 31\n").unwrap();

    sasplot()
        .args(["iq", input.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .args(["--probe", "1.5", "--grid", "--title", "sample A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2, 20 \u{00B1} 3"))
        .stderr(predicate::str::contains("Wrote plot to"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("sample A"));
}

#[test]
fn iq_with_nothing_plottable_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("iq.csv");
    fs::write(&input, "1,-1,0.1\n2,1,2\n").unwrap();
    sasplot()
        .args(["iq", input.to_str().unwrap(), "-o"])
        .arg(dir.path().join("x.svg"))
        .assert()
        .failure();
}

#[test]
fn iqxy_reads_options_file_and_writes_scene() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("grid.json");
    let options = dir.path().join("opts.json");
    let out = dir.path().join("grid.svg");
    let scene = dir.path().join("scene.json");
    fs::write(
        &input,
        r#"{"qx":[0,1,2],"qy":[0,1],"values":[[1,2,null],[4,5,6]],"max_intensity":6}"#,
    )
    .unwrap();
    fs::write(&options, r#"{"width": 300, "log_scale": true}"#).unwrap();

    sasplot()
        .arg("iqxy")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("--options")
        .arg(&options)
        .arg("--scene")
        .arg(&scene)
        .args(["--palette", "spectral"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote heatmap to"));

    assert!(fs::read_to_string(&out).unwrap().contains("<svg"));
    let tree = fs::read_to_string(&scene).unwrap();
    assert!(tree.contains("\"Spectral\""));
    assert!(tree.contains("q0-11"));
}

#[test]
fn iq_overlay_draws_every_data_set() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a.dat");
    let second = dir.path().join("b.csv");
    let out = dir.path().join("both.svg");
    let scene = dir.path().join("both.json");
    fs::write(&first, "1 10 1\n2 20 3\n").unwrap();
    fs::write(&second, "3,30,2\n4,25,1\n5,22,1\n").unwrap();

    sasplot()
        .arg("iq")
        .arg(&first)
        .arg("-o")
        .arg(&out)
        .arg("--overlay")
        .arg(&second)
        .arg("--scene")
        .arg(&scene)
        .args(["--probe", "4.9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5, 22 \u{00B1} 1"));

    let svg = fs::read_to_string(&out).unwrap();
    assert_eq!(svg.matches("<circle").count(), 6);
    let tree = fs::read_to_string(&scene).unwrap();
    assert!(tree.contains("#d62728"));
}

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const SUMMARY: &str = "\
                   AIRES version 19.04.08
  Primary particle: Proton
  Primary energy: 1.0000 EeV
  Primary zenith angle:            53.44 deg
  Primary azimuth angle:           0.00 deg
  Site: Malargue (Lat:  -35.20 deg. Long:  -69.20 deg)
  Ground altitude:                 1400.00 m
  Injection altitude:              100.00 km
  Geomagnetic field: Intensity:  24.6 uT
          I:  -35.7 deg
          D:    2.5 deg
  Time bin size: 0.50ns
  Thinning energy:      1.000E-04 Relative
";

/// `samples` rows per antenna for antennas `1..=antennas`, interleaved the
/// way ZHAireS writes them.
pub fn waveform_text(antennas: u32, samples: u32) -> String {
    let mut out = String::from("# shower antenna x y z t |A| Ax Ay Az |E| Ex Ey Ez\n");
    for s in 0..samples {
        for a in 1..=antennas {
            let t = f64::from(s) * 0.5;
            out.push_str(&format!(
                "1 {a} {x:.1} 0.0 1400.0 {t} 0 0 0 0 0 {ex:e} 0.0 0.0\n",
                x = f64::from(a) * 100.0,
                ex = f64::from(s + 1) * 1e-6,
            ));
        }
    }
    out
}

/// Lays out `<root>/<task>/` with a summary and a waveform file.
pub fn write_output(root: &Path, task: &str, waveforms: &str) -> PathBuf {
    let dir = root.join(task);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{task}.sry")), SUMMARY).unwrap();
    std::fs::write(dir.join("timefresnel-root.dat"), waveforms).unwrap();
    dir
}

/// Stub `Aires` producing a two-antenna waveform file.
#[cfg(unix)]
pub fn write_stub_aires(dir: &Path, exit_code: i32) -> PathBuf {
    write_stub_aires_with(dir, exit_code, &waveform_text(2, 4))
}

/// Writes a stand-in for the `Aires` binary.
///
/// It stores its stdin as `received.inp` in its working directory, then
/// writes `<TaskName>.sry`, `Zhaires.status` and `waveforms` as
/// `timefresnel-root.dat` before exiting with `exit_code`.
#[cfg(unix)]
pub fn write_stub_aires_with(dir: &Path, exit_code: i32, waveforms: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = format!(
        "#!/bin/sh\n\
         cat > received.inp\n\
         name=$(sed -n 's/^TaskName //p' received.inp)\n\
         cat > \"$name.sry\" <<'SRY'\n{SUMMARY}SRY\n\
         cat > timefresnel-root.dat <<'DAT'\n{waveforms}DAT\n\
         touch Zhaires.status\n\
         echo \"simulating $name\"\n\
         echo \"stub diagnostics\" >&2\n\
         exit {exit_code}\n"
    );
    let path = dir.join("Aires");
    std::fs::write(&path, script).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use csv::ReaderBuilder;

use crate::types::{Landmark, LANDMARK_COUNT};

type PartialFrame = [Option<Landmark>; LANDMARK_COUNT];

/// Carga una sesión de landmarks desde un CSV en el formato
/// frame,landmark,x,y,z (una fila por landmark).
///
/// Devuelve una entrada por frame desde 0 hasta el mayor frame visto.
/// Los frames ausentes o incompletos (menos de 21 landmarks) quedan
/// vacíos, que el clasificador interpreta como "sin mano".
pub fn load_frames_from_csv(path: impl AsRef<Path>) -> Result<Vec<Vec<Landmark>>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("No se pudo abrir el CSV {:?}", path))?;

    let mut frames: BTreeMap<usize, PartialFrame> = BTreeMap::new();

    for (row_idx, result) in reader.records().enumerate() {
        let row = row_idx + 1;
        let record = result.with_context(|| format!("Fila {} inválida en {:?}", row, path))?;
        if record.len() < 5 {
            bail!("La fila {} tiene {} columnas, se esperaban 5", row, record.len());
        }

        let frame: usize = record[0]
            .parse()
            .with_context(|| format!("frame inválido en fila {}", row))?;
        let landmark: usize = record[1]
            .parse()
            .with_context(|| format!("landmark inválido en fila {}", row))?;
        ensure!(
            landmark < LANDMARK_COUNT,
            "Landmark {} fuera de rango (fila {})",
            landmark,
            row
        );

        let x: f32 = record[2]
            .parse()
            .with_context(|| format!("x inválido en fila {}", row))?;
        let y: f32 = record[3]
            .parse()
            .with_context(|| format!("y inválido en fila {}", row))?;
        let z: f32 = record[4]
            .parse()
            .with_context(|| format!("z inválido en fila {}", row))?;

        frames.entry(frame).or_insert([None; LANDMARK_COUNT])[landmark] =
            Some(Landmark::new(x, y, z));
    }

    let Some(&max_frame) = frames.keys().next_back() else {
        bail!("El CSV {:?} no contiene datos", path);
    };

    let session = (0..=max_frame)
        .map(|idx| {
            frames
                .get(&idx)
                .and_then(|partial| partial.iter().copied().collect::<Option<Vec<_>>>())
                .unwrap_or_default()
        })
        .collect();

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn full_frame(frame: usize) -> String {
        (0..LANDMARK_COUNT)
            .map(|i| format!("{},{},{},{},0.0\n", frame, i, 0.5, i as f32 / 100.0))
            .collect()
    }

    #[test]
    fn test_groups_rows_by_frame() {
        let content = format!("frame,landmark,x,y,z\n{}{}", full_frame(0), full_frame(1));
        let file = write_csv(&content);
        let frames = load_frames_from_csv(file.path()).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].len(), LANDMARK_COUNT);
        assert_eq!(frames[1][20], Landmark::new(0.5, 0.2, 0.0));
    }

    #[test]
    fn test_gaps_and_partial_frames_are_empty() {
        let content = format!(
            "frame,landmark,x,y,z\n{}2,0,0.5,0.5,0.0\n{}",
            full_frame(0),
            full_frame(3)
        );
        let file = write_csv(&content);
        let frames = load_frames_from_csv(file.path()).unwrap();
        assert_eq!(frames.len(), 4);
        assert!(frames[1].is_empty());
        assert!(frames[2].is_empty());
        assert_eq!(frames[3].len(), LANDMARK_COUNT);
    }

    #[test]
    fn test_rows_may_be_unordered() {
        let mut rows: Vec<String> = full_frame(0).lines().map(str::to_string).collect();
        rows.reverse();
        let file = write_csv(&format!("frame,landmark,x,y,z\n{}\n", rows.join("\n")));
        let frames = load_frames_from_csv(file.path()).unwrap();
        assert_eq!(frames[0][0], Landmark::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_landmark_out_of_range() {
        let file = write_csv("frame,landmark,x,y,z\n0,21,0.5,0.5,0.0\n");
        let err = load_frames_from_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("fuera de rango"));
    }

    #[test]
    fn test_malformed_value() {
        let file = write_csv("frame,landmark,x,y,z\n0,0,abc,0.5,0.0\n");
        let err = load_frames_from_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("x inválido en fila 1"));
    }

    #[test]
    fn test_empty_csv() {
        let file = write_csv("frame,landmark,x,y,z\n");
        let err = load_frames_from_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("no contiene datos"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_frames_from_csv(dir.path().join("ausente.csv")).unwrap_err();
        assert!(err.to_string().starts_with("No se pudo abrir el CSV"));
    }
}

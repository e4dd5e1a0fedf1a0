use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use gesture_chat::config::Config;
use gesture_chat::csv_loader::load_frames_from_csv;
use gesture_chat::gesture_classifier::GestureClassifier;
use gesture_chat::vocabulary::Vocabulary;

const USAGE: &str = "Uso: replay_csv [--config <file>] [--audit] [<landmarks.csv>]";

struct ReplayOptions {
    audit: bool,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<(Option<PathBuf>, ReplayOptions)> {
    let mut audit = false;
    let mut config: Option<PathBuf> = None;
    let mut csv_path: Option<PathBuf> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--audit" => audit = true,
            "--config" => {
                let path = args.next().ok_or_else(|| anyhow!("--config necesita un archivo"))?;
                config = Some(PathBuf::from(path));
            }
            _ => {
                if csv_path.is_some() {
                    bail!(USAGE);
                }
                csv_path = Some(PathBuf::from(arg));
            }
        }
    }

    if csv_path.is_none() && !audit {
        bail!("Se requiere un CSV de landmarks o --audit\n{}", USAGE);
    }
    Ok((csv_path, ReplayOptions { audit, config }))
}

fn print_audit(classifier: &GestureClassifier) {
    let report = classifier.audit();

    println!("\n🔍 Alcance de las reglas");
    if report.cascade.unreachable_rules.is_empty() {
        println!("  todas las reglas pueden decidir un frame");
    }
    for (pass, rule) in &report.cascade.unreachable_rules {
        println!("  ⚠️  {}/{} queda tapada por reglas anteriores", pass, rule);
    }

    println!(
        "\n🏷️  {} de {} etiquetas del vocabulario se pueden producir",
        classifier.vocabulary().len() - report.orphaned_labels.len(),
        classifier.vocabulary().len()
    );
    let words = report.orphaned_words(classifier.vocabulary());
    for (label, word) in report.orphaned_labels.iter().zip(words) {
        println!("  ❌ {:<18} (palabra \"{}\") nunca se reconoce", label, word);
    }
}

fn main() -> Result<()> {
    let (csv_path, opts) = parse_args()?;

    let config = match &opts.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("No se pudo cargar la configuración {:?}", path))?,
        None => Config::default(),
    };
    let classifier = GestureClassifier::new(config.thresholds, Vocabulary::default());

    if let Some(csv_path) = csv_path {
        println!("🎞️  Reproduciendo landmarks de {:?}\n", csv_path);
        let frames = load_frames_from_csv(&csv_path)?;

        println!(
            "{:>5}  {:<5}  {:>5} {:>5}  {:<4}  {:<18} {:>5}  {}",
            "frame", "flags", "cx", "cy", "tilt", "gesture", "conf", "rule"
        );
        for (idx, landmarks) in frames.iter().enumerate() {
            let features = match classifier.extractor().extract(landmarks) {
                Ok(features) => features,
                Err(e) => {
                    println!("{:>5}  sin mano ({})", idx, e);
                    continue;
                }
            };
            let result = classifier.classify(landmarks);
            let descriptor = features.descriptor;
            println!(
                "{:>5}  {:<5}  {:>5.2} {:>5.2}  {:<4}  {:<18} {:>5.2}  {}",
                idx,
                features.fingers,
                descriptor.center_x,
                descriptor.center_y,
                if descriptor.tilted { "sí" } else { "no" },
                result.gesture.map(|g| g.as_str()).unwrap_or("-"),
                result.confidence,
                result.rule.unwrap_or("-"),
            );
        }
    }

    if opts.audit {
        print_audit(&classifier);
    }

    Ok(())
}

/*
Gesture Chat - de landmarks de la mano a palabras y frases

Reproduce una sesión de landmarks grabada por el detector de mano, reconoce
un gesto por frame, acumula las palabras señadas e imprime sugerencias de
frases para ellas.

Uso:
    gesture-chat [--config <file>] [--vocabulary <file>] [--verbose] <landmarks.csv>
    gesture-chat --words hello,you
    gesture-chat --list

El nivel de log sigue a RUST_LOG si está definido.
*/

use anyhow::{anyhow, bail, Context, Result};
use crossbeam_channel::bounded;
use std::env;
use std::path::PathBuf;
use std::thread;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gesture_chat::config::Config;
use gesture_chat::csv_loader::load_frames_from_csv;
use gesture_chat::gesture_classifier::GestureClassifier;
use gesture_chat::sentence_predictor::SentencePredictor;
use gesture_chat::types::{GestureCategory, Landmark};
use gesture_chat::vocabulary::Vocabulary;

const FRAME_QUEUE: usize = 64;
const USAGE: &str = "Uso: gesture-chat [--config <file>] [--vocabulary <file>] [--verbose] \
                     (<landmarks.csv> | --words w1,w2 | --list)";

#[derive(Debug, Default)]
struct Options {
    session: Option<PathBuf>,
    words: Option<Vec<String>>,
    config: Option<PathBuf>,
    vocabulary: Option<PathBuf>,
    list: bool,
    verbose: bool,
}

fn parse_args() -> Result<Options> {
    let mut opts = Options::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--words" => {
                let list = args.next().ok_or_else(|| anyhow!("--words necesita un valor"))?;
                opts.words = Some(
                    list.split(',')
                        .map(str::trim)
                        .filter(|w| !w.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            "--config" => {
                let path = args.next().ok_or_else(|| anyhow!("--config necesita un archivo"))?;
                opts.config = Some(PathBuf::from(path));
            }
            "--vocabulary" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow!("--vocabulary necesita un archivo"))?;
                opts.vocabulary = Some(PathBuf::from(path));
            }
            "--list" => opts.list = true,
            "--verbose" | "-v" => opts.verbose = true,
            "--help" | "-h" => bail!(USAGE),
            _ if arg.starts_with('-') => bail!("Opción desconocida {}\n{}", arg, USAGE),
            _ => {
                if opts.session.is_some() {
                    bail!(USAGE);
                }
                opts.session = Some(PathBuf::from(arg));
            }
        }
    }

    if opts.session.is_none() && opts.words.is_none() && !opts.list {
        bail!(USAGE);
    }
    Ok(opts)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn print_vocabulary(vocabulary: &Vocabulary, predictor: &SentencePredictor) {
    println!("📚 Vocabulario de gestos ({} gestos)\n", vocabulary.len());
    for category in GestureCategory::ALL {
        let entries = vocabulary.by_category(category);
        println!("  {} ({}):", category.as_str(), entries.len());
        for (label, word) in entries {
            println!("    {:<18} → {}", label.as_str(), word);
        }
    }

    println!("\n🗂️  Categorías de frases:");
    for category in predictor.templates().categories() {
        let count = predictor.templates().sentences(category).len();
        println!("  {:<18} {} frases", category, count);
    }
}

fn print_suggestions(words: &[String], predictor: &SentencePredictor) {
    println!("\n💬 Palabras: [{}]", words.join(", "));
    println!("💡 Sugerencias:");
    for (idx, sentence) in predictor.predict(words).iter().enumerate() {
        println!("  {:>2}. {}", idx + 1, sentence);
    }
}

/// Pasa una sesión grabada por el clasificador y devuelve las palabras
/// señadas, colapsando repeticiones consecutivas de la misma palabra.
fn replay_session(path: PathBuf, classifier: &GestureClassifier) -> Result<Vec<String>> {
    println!("🎞️  Reproduciendo sesión {:?}\n", path);

    let (tx, rx) = bounded::<Vec<Landmark>>(FRAME_QUEUE);
    let reader = thread::spawn(move || -> Result<usize> {
        let frames = load_frames_from_csv(&path)?;
        let total = frames.len();
        for frame in frames {
            if tx.send(frame).is_err() {
                break;
            }
        }
        Ok(total)
    });

    let mut words: Vec<String> = Vec::new();
    let mut recognized = 0usize;
    for (frame_idx, landmarks) in rx.iter().enumerate() {
        let result = classifier.classify(&landmarks);
        let (Some(gesture), Some(word)) = (result.gesture, result.word) else {
            debug!(frame = frame_idx, "sin gesto");
            continue;
        };

        recognized += 1;
        println!(
            "🖐️  Frame {:>4}: {:<18} {:>5.1}% → {}",
            frame_idx,
            gesture,
            result.confidence * 100.0,
            word
        );
        if words.last() != Some(&word) {
            words.push(word);
        }
    }

    let total = reader
        .join()
        .map_err(|_| anyhow!("El hilo lector de la sesión entró en pánico"))??;
    info!(frames = total, recognized, words = words.len(), "sesión reproducida");
    println!("\n✅ {} frames, {} con gesto", total, recognized);

    Ok(words)
}

fn main() -> Result<()> {
    let opts = parse_args()?;
    init_tracing(opts.verbose);

    let config = match &opts.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("No se pudo cargar la configuración {:?}", path))?,
        None => Config::default(),
    };
    let vocabulary = match &opts.vocabulary {
        Some(path) => Vocabulary::from_json_file(path)
            .with_context(|| format!("No se pudo cargar el vocabulario {:?}", path))?,
        None => Vocabulary::default(),
    };

    let classifier = GestureClassifier::new(config.thresholds, vocabulary);
    let predictor = SentencePredictor::new(config.limits);

    println!("🎯 Gesture Chat\n");

    if opts.list {
        print_vocabulary(classifier.vocabulary(), &predictor);
    }

    if let Some(words) = &opts.words {
        print_suggestions(words, &predictor);
    }

    if let Some(path) = opts.session {
        let words = replay_session(path, &classifier)?;
        print_suggestions(&words, &predictor);
    }

    Ok(())
}

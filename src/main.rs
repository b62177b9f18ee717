use std::env;
use std::process::ExitCode;

use textsim::{
    train_lda, train_lsi, DirLoader, LdaConfig, ModelPaths, Preprocessor, StopwordSet,
    WhitespaceSegmenter,
};

const NUM_TOPICS: usize = 20;

/// Train both model stacks over a corpus directory.
///
/// Usage: `textsim [CORPUS_DIR] [MODEL_DIR] [LIMIT]`
fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let corpus_dir = args.next().unwrap_or_else(|| "corpus".to_string());
    let model_dir = args.next().unwrap_or_else(|| "model".to_string());
    let limit = args.next().and_then(|value| value.parse().ok());

    let stopwords = match StopwordSet::load_default() {
        Ok(set) => set,
        Err(e) => {
            log::error!("failed to load stopwords: {e}");
            return ExitCode::FAILURE;
        }
    };

    let preprocessor = Preprocessor::new(stopwords);
    let loader = DirLoader::new(&corpus_dir);
    let paths = ModelPaths::new(&model_dir);

    if let Err(e) = train_lsi(
        &preprocessor,
        &loader,
        &WhitespaceSegmenter,
        NUM_TOPICS,
        &paths,
        limit,
    ) {
        log::error!("lsi training failed: {e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = train_lda(NUM_TOPICS, &LdaConfig::default(), &paths) {
        log::error!("lda training failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

pub mod cache;
pub mod conjugator;
pub mod extractor;
pub mod fetcher;
pub mod generator;
pub mod html;
pub mod merge;
pub mod translator;
pub mod validator;


pub use cache::CacheStore;
pub use conjugator::SpanishConjugator;
pub use extractor::SpanishDictExtractor;
pub use fetcher::SpanishDictSource;
pub use generator::SpanishGenerator;
pub use translator::MyMemoryTranslator;
pub use validator::ConjugationValidator;

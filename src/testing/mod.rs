mod fake_headline_source;
mod fake_text_generator;

pub use fake_headline_source::FakeHeadlineSource;
pub use fake_text_generator::FakeTextGenerator;

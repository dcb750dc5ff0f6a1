mod provider;
mod synthesizer;

pub use provider::RouteProvider;
pub use synthesizer::synthesize;

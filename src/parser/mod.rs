pub mod chart_parser;
pub mod drum_resolver;
pub mod hopo_resolver;
pub mod primitive_parser;
pub mod section_parser;
pub mod span_parser;
pub mod tempo_parser;
pub mod track_builder;

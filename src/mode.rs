/// JSON-LD processing mode.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ProcessingMode {
	/// JSON-LD 1.0.
	JsonLd1_0,

	/// JSON-LD 1.1.
	JsonLd1_1,
}

impl ProcessingMode {
	pub fn is_1_1(&self) -> bool {
		matches!(self, ProcessingMode::JsonLd1_1)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			ProcessingMode::JsonLd1_0 => "json-ld-1.0",
			ProcessingMode::JsonLd1_1 => "json-ld-1.1",
		}
	}
}

impl Default for ProcessingMode {
	fn default() -> ProcessingMode {
		ProcessingMode::JsonLd1_1
	}
}

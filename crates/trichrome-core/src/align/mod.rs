pub mod compose;
pub mod metric;
pub mod pyramid;
pub mod search;
pub mod shift;

pub use compose::compose;
pub use metric::{MetricKind, NormalizedCrossCorrelation, SimilarityMetric, SumSquaredDifferences};
pub use pyramid::{pyramid_align, pyramid_levels, LevelRecord, PyramidAlignment, PyramidLevel};
pub use search::{search, search_pair, PairSearch, SearchResult, SearchWindow};
pub use shift::{apply_correction, circular_shift};

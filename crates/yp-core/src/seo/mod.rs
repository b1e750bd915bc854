//! SEO task seeding: keyword gaps in, a prioritized pillar/spoke task list
//! out.
//!
//! The pipeline is pure up to [`upload`]: [`gap::GapFile`] is parsed,
//! [`builder::TaskBuilder`] consolidates and scores it against
//! [`tables::SeoTables`], and the result can be written to disk or
//! upserted into a [`upload::TaskStore`].

pub mod builder;
pub mod content;
pub mod gap;
pub mod score;
pub mod tables;
pub mod task;
pub mod upload;

pub use builder::{sort_tasks, TaskBuilder};
pub use content::{determine_content_type, generate_slug, ExpertAttribution};
pub use gap::{Gap, GapFile};
pub use score::{calculate_priority_score, priority_bucket, score_with_diagnostics, ScoreDiagnostics};
pub use tables::{ConsolidationRule, LinkRequirement, PillarDefinition, SeoTables};
pub use task::{SeoPayload, SeoTask, TaskSummary};
pub use upload::{upload_tasks, ConvexTaskStore, MemoryTaskStore, TaskStore, UploadSummary, UpsertAction};

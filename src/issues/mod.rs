// issues 模块
// 扫描结果的规范化、多版本合并、去重与忽略列表过滤

pub mod canonical;
pub mod dedup;
pub mod ignore;
pub mod merge;

pub use canonical::canonicalize;
pub use dedup::suppress_duplicates;
pub use ignore::{filter_ignorable, IgnoreList};
pub use merge::{fingerprint, MergeGroups, VersionMerger, VersionedIssueGroup};

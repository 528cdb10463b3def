//! Analysis engine for determining per-module release decisions

pub mod module_analyzer;

pub use module_analyzer::{
    analyze_modules, ClassifiedCommit, ModuleAnalyzer, ModuleOutcome, ModuleReport,
};

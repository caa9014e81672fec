//! Run parameters, parsed from three positional arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::types::SupportCount;

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "apriori-fset")]
#[command(version)]
#[command(about = "Mine frequent itemsets level by level with Apriori", long_about = None)]
pub struct Config {
    /// Support count an itemset needs to be frequent
    pub min_support: SupportCount,

    /// Directory holding the *.txt transaction files
    pub data_location: PathBuf,

    /// Directory for result files, created if missing
    pub output_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positionals() {
        let config = Config::try_parse_from(["apriori-fset", "3", "data", "out"]).unwrap();

        assert_eq!(
            config,
            Config {
                min_support: 3,
                data_location: PathBuf::from("data"),
                output_dir: PathBuf::from("out"),
            }
        );
    }

    #[test]
    fn all_three_are_required() {
        assert!(Config::try_parse_from(["apriori-fset", "3", "data"]).is_err());
    }

    #[test]
    fn min_support_is_a_count() {
        assert!(Config::try_parse_from(["apriori-fset", "0.5", "data", "out"]).is_err());
        assert!(Config::try_parse_from(["apriori-fset", "-1", "data", "out"]).is_err());
    }

    #[test]
    fn no_flags() {
        assert!(Config::try_parse_from(["apriori-fset", "--min-support", "3", "data", "out"]).is_err());
    }
}

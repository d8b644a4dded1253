use tymlate::config::TemplatesConfig;
use tymlate::error::Error;
use tymlate::filter::{PathFilter, BOTH_LISTS_ADVISORY};

fn templates(excludes: &[&str], includes: &[&str]) -> TemplatesConfig {
    TemplatesConfig {
        excludes: excludes.iter().map(|s| s.to_string()).collect(),
        includes: includes.iter().map(|s| s.to_string()).collect(),
        ..TemplatesConfig::default()
    }
}

#[test]
fn test_no_patterns_selects_everything() {
    let filter = PathFilter::from_config(&templates(&[], &[])).unwrap();
    assert!(filter.is_selected("debug.log"));
    assert!(filter.is_selected("nested/app.conf.tmpl"));
}

#[test]
fn test_exclude_mode() {
    let filter = PathFilter::from_config(&templates(&[r"\.log$", "^tmp/"], &[])).unwrap();
    assert!(matches!(filter, PathFilter::Exclude(_)));

    assert!(!filter.is_selected("debug.log"));
    assert!(!filter.is_selected("logs/debug.log"));
    assert!(!filter.is_selected("tmp/cache"));
    assert!(filter.is_selected("debug.log.tmpl"));
    assert!(filter.is_selected("src/tmp/cache"));
}

#[test]
fn test_patterns_match_anywhere() {
    let filter = PathFilter::from_config(&templates(&["secret"], &[])).unwrap();
    assert!(!filter.is_selected("config/my-secret-file.txt"));
}

#[test]
fn test_include_mode() {
    let filter = PathFilter::from_config(&templates(&[], &[r"\.conf", "^bin/"])).unwrap();
    assert!(matches!(filter, PathFilter::Include(_)));

    assert!(filter.is_selected("app.conf.tmpl"));
    assert!(filter.is_selected("bin/run"));
    assert!(!filter.is_selected("README.md"));
}

#[test]
fn test_include_wins_over_exclude() {
    let filter = PathFilter::from_config(&templates(&[r"\.conf"], &[r"\.conf"])).unwrap();
    assert!(matches!(filter, PathFilter::Include(_)));

    assert!(filter.is_selected("app.conf"));
    assert!(!filter.is_selected("debug.log"));
}

#[test]
fn test_invalid_pattern() {
    let result = PathFilter::from_config(&templates(&["(unclosed"], &[]));
    assert!(matches!(result, Err(Error::PatternError(_))));
}

#[test]
fn test_advisory_only_when_both_lists_are_set() {
    assert_eq!(
        PathFilter::advisory(&templates(&[r"\.log$"], &[r"\.conf"])),
        Some(BOTH_LISTS_ADVISORY)
    );
    assert_eq!(PathFilter::advisory(&templates(&[r"\.log$"], &[])), None);
    assert_eq!(PathFilter::advisory(&templates(&[], &[r"\.conf"])), None);
    assert_eq!(PathFilter::advisory(&templates(&[], &[])), None);
}

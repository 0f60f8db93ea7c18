use sitemapper::handlers::*;
use sitemapper_scanner::Seed;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_parse_url_line_with_scheme() {
    let result = parse_url_line("https://example.com");
    assert_eq!(result, Some("https://example.com".to_string()));
}

#[test]
fn test_parse_url_line_without_scheme() {
    let result = parse_url_line("example.com");
    assert_eq!(result, Some("http://example.com".to_string()));
}

#[test]
fn test_parse_url_line_host_and_port() {
    let result = parse_url_line("localhost:8080");
    assert_eq!(result, Some("http://localhost:8080".to_string()));
}

#[test]
fn test_parse_url_line_invalid() {
    let result = parse_url_line("not a valid url!!!");
    assert_eq!(result, None);
}

#[test]
fn test_parse_seed_line_default_depth() {
    let seed = parse_seed_line("http://a.test", 2).unwrap();
    assert_eq!(seed, Seed::with_depth("http://a.test", 2));
}

#[test]
fn test_parse_seed_line_explicit_depth() {
    let seed = parse_seed_line("  https://stackoverflow.com   1 ", 2).unwrap();
    assert_eq!(seed, Seed::with_depth("https://stackoverflow.com", 1));
}

#[test]
fn test_parse_seed_line_bad_depth() {
    assert_eq!(parse_seed_line("http://a.test deep", 2), None);
}

#[test]
fn test_parse_seed_line_trailing_token() {
    assert_eq!(parse_seed_line("http://a.test 1 junk", 2), None);
    assert_eq!(
        parse_seed_line("http://a.test\t1\t", 2),
        Some(Seed::with_depth("http://a.test", 1))
    );
}

#[test]
fn test_parse_seed_line_skips_blank_and_comments() {
    assert_eq!(parse_seed_line("", 2), None);
    assert_eq!(parse_seed_line("   ", 2), None);
    assert_eq!(parse_seed_line("# http://a.test", 2), None);
}

#[test]
fn test_load_seeds_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "# seeds")?;
    writeln!(temp_file, "http://crawler-test.com 1")?;
    writeln!(temp_file, "google.com")?;
    writeln!(temp_file)?; // Empty line
    writeln!(temp_file, "https://yandex.ru 0")?;

    let path = PathBuf::from(temp_file.path());
    let seeds = load_seeds_from_file(&path, 2)?;

    assert_eq!(
        seeds,
        vec![
            Seed::with_depth("http://crawler-test.com", 1),
            Seed::with_depth("http://google.com", 2),
            Seed::with_depth("https://yandex.ru", 0),
        ]
    );

    Ok(())
}

#[test]
fn test_load_seeds_from_file_empty() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file).unwrap();
    writeln!(temp_file, "   ").unwrap();

    let path = PathBuf::from(temp_file.path());
    let result = load_seeds_from_file(&path, 2);

    assert!(result.is_err());
    assert!(result.unwrap_err().contains("No valid URLs"));
}

#[test]
fn test_load_seeds_from_missing_file() {
    let path = PathBuf::from("/nonexistent/sitemapper/seeds.txt");
    let result = load_seeds_from_file(&path, 2);
    assert!(result.unwrap_err().contains("Failed to read hosts file"));
}

#[test]
fn test_load_seeds_from_source_urls() {
    let urls = vec!["http://a.test".to_string(), "b.test".to_string()];
    let seeds = load_seeds_from_source(&urls, None, 3).unwrap();

    assert_eq!(
        seeds,
        vec![
            Seed::with_depth("http://a.test", 3),
            Seed::with_depth("http://b.test", 3),
        ]
    );
}

#[test]
fn test_load_seeds_from_source_prefers_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "http://file.test 1")?;
    let path = PathBuf::from(temp_file.path());

    let seeds = load_seeds_from_source(&["http://ignored.test".to_string()], Some(&path), 2)?;
    assert_eq!(seeds, vec![Seed::with_depth("http://file.test", 1)]);

    Ok(())
}

#[test]
fn test_load_seeds_from_source_no_input() {
    let result = load_seeds_from_source(&[], None, 2);
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .contains("Either --url or --hosts-file must be provided")
    );
}

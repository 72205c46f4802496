//! Custom assertions for converted sources

use relaxdecor::config::ConversionConfig;

/// Number of helper definitions in `output`
pub fn helper_count(output: &str, name: &str) -> usize {
    let head = format!("def {name}(expr):");
    output
        .lines()
        .filter(|line| line.trim_start() == head)
        .count()
}

/// Assert that converting `output` again changes nothing
pub fn assert_fixed_point(output: &str, config: &ConversionConfig) {
    let again = relaxdecor::convert(output, None, config).unwrap();
    assert!(
        again == output,
        "Second conversion changed the output:\n--- first\n{output}\n--- second\n{again}"
    );
}

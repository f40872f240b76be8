/// build the path a decode result is written to when `--output` names a directory.
pub fn build_output_path(output: &str, filename: &str) -> String {
    format!("{}/{}", output.trim_end_matches('/'), filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_specified() {
        assert_eq!(build_output_path("/some_dir", "decoded.txt"), "/some_dir/decoded.txt");
    }

    #[test]
    fn test_output_trailing_slash() {
        assert_eq!(build_output_path("/some_dir/", "decoded.txt"), "/some_dir/decoded.txt");
    }

    #[test]
    fn test_output_literal_output_dir() {
        assert_eq!(build_output_path("output", "decoded.txt"), "output/decoded.txt");
    }
}

//! Parallel synthesis of independent snippets.

use rayon::prelude::*;

use crate::error::Result;
use crate::options::SynthesisOptions;

/// Synthesize every snippet in parallel. Results come back in input order,
/// one per snippet; a failing snippet does not affect the others.
pub fn synthesize_all(snippets: &[&str], options: &SynthesisOptions) -> Vec<Result<String>> {
    tracing::debug!(count = snippets.len(), "batch synthesis");
    snippets
        .par_iter()
        .map(|snippet| crate::synthesize(snippet, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthesisError;

    #[test]
    fn test_results_keep_input_order() {
        let snippets = ["<a />", "const B = () => <b />;", "<div", "<c />"];
        let results = synthesize_all(&snippets, &SynthesisOptions::default());
        assert_eq!(results.len(), 4);
        assert!(results[0].as_ref().unwrap().contains("    <a />"));
        assert!(results[1].as_ref().unwrap().contains("ReactDOM.render(<B />"));
        assert!(matches!(results[2], Err(SynthesisError::Parse { .. })));
        assert!(results[3].as_ref().unwrap().contains("    <c />"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let snippets: Vec<String> = (0..32).map(|i| format!("<div id=\"n{}\" />", i)).collect();
        let refs: Vec<&str> = snippets.iter().map(String::as_str).collect();
        let options = SynthesisOptions::default();
        let parallel = synthesize_all(&refs, &options);
        for (snippet, result) in refs.iter().zip(parallel) {
            assert_eq!(result, crate::synthesize(snippet, &options));
        }
    }
}

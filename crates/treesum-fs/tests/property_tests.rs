use proptest::prelude::*;
use treesum_fs::NormalizedPath;
use treesum_fs::checksum::{DIGEST_WIDTH, Digest, compute_content_digest};

proptest! {
    #[test]
    fn test_normalization_has_no_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));
    }

    #[test]
    fn test_relative_paths_resolve_back(segments in prop::collection::vec("[a-z0-9_.-]{1,8}", 1..5)) {
        prop_assume!(segments.iter().all(|s| s != "." && s != ".."));
        let root = std::path::Path::new("/root");
        let rel = NormalizedPath::new(segments.join("/"));
        let absolute = rel.resolve(root);
        let back = NormalizedPath::relative_to(&absolute, root).unwrap();
        prop_assert_eq!(back, rel);
    }

    #[test]
    fn test_every_content_digest_parses(content in prop::collection::vec(any::<u8>(), 0..256)) {
        let digest = compute_content_digest(&content);
        prop_assert_eq!(digest.as_str().len(), DIGEST_WIDTH);
        prop_assert_eq!(Digest::parse(digest.as_str()).unwrap(), digest);
    }
}

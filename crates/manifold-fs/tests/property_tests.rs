use manifold_fs::NormalizedPath;
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        Just("..".to_string()),
        Just(String::new()),
        "[a-z]{1,6}",
    ]
}

fn path_string() -> impl Strategy<Value = String> {
    (any::<bool>(), prop::collection::vec(segment(), 0..8)).prop_map(|(rooted, parts)| {
        let body = parts.join("/");
        if rooted { format!("/{body}") } else { body }
    })
}

proptest! {
    #[test]
    fn test_cleaning_is_idempotent(s in path_string()) {
        let once = NormalizedPath::new(&s);
        let twice = NormalizedPath::new(once.as_str());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_cleaned_paths_have_no_redundant_elements(s in path_string()) {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(!as_str.contains("//"));
        prop_assert!(!as_str.contains('\\'));
        prop_assert!(as_str == "/" || !as_str.ends_with('/'));
        prop_assert!(as_str == "." || as_str.split('/').all(|p| p != "."));
        if path.is_rooted() {
            prop_assert!(as_str.split('/').all(|p| p != ".."));
        }
    }

    #[test]
    fn test_join_matches_clean_of_concatenation(a in path_string(), b in path_string()) {
        prop_assume!(!a.is_empty());
        let joined = NormalizedPath::new(&a).join(&b);
        let expected = if b.is_empty() {
            NormalizedPath::new(&a)
        } else {
            NormalizedPath::new(format!("{a}/{b}"))
        };
        prop_assert_eq!(joined, expected);
    }
}

use nestkv::config::Config;
use nestkv::store::Strategy;
use nestkv::terminal::serve;

async fn run_lines(strategy: Strategy, lines: &[&str]) -> Vec<String> {
    let config = Config {
        strategy,
        ..Config::default()
    };

    let input = lines.join("\n");
    let mut output = Vec::new();

    serve(config, input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

async fn test_both(lines: &[&str], expected: &[&str]) {
    for strategy in [Strategy::Mutex, Strategy::Sequencer] {
        let actual = run_lines(strategy, lines).await;
        assert_eq!(actual, expected, "strategy {strategy}");
    }
}

#[tokio::test]
async fn test_walkthrough() {
    test_both(
        &[
            "SET foo bar",
            "GET foo",
            "COUNT bar",
            "BEGIN",
            "SET foo baz",
            "COUNT bar",
            "COUNT baz",
            "ROLLBACK",
            "GET foo",
            "COMMIT",
        ],
        &["bar", "1", "0", "1", "bar", "no transaction"],
    )
    .await;
}

#[tokio::test]
async fn test_blank_lines_are_ignored() {
    test_both(&["", "   ", "set a 1", "\t", "get a"], &["1"]).await;
}

#[tokio::test]
async fn test_errors() {
    test_both(
        &[
            "HELLO",
            "GET",
            "SET a b c",
            "GET missing",
            "DELETE missing",
            "ROLLBACK",
            "COMMIT",
        ],
        &[
            "unknown command",
            "unknown command",
            "unknown command",
            "key not set",
            "key not set",
            "no transaction",
            "no transaction",
        ],
    )
    .await;
}

#[tokio::test]
async fn test_nested_transactions() {
    test_both(
        &[
            "SET a 10",
            "BEGIN",
            "SET a 20",
            "BEGIN",
            "SET a 30",
            "GET a",
            "ROLLBACK",
            "GET a",
            "COMMIT",
            "GET a",
            "COUNT 10",
            "COUNT 20",
            "COMMIT",
        ],
        &["30", "20", "20", "0", "1", "no transaction"],
    )
    .await;
}

#[tokio::test]
async fn test_delete_and_count() {
    test_both(
        &[
            "SET a x",
            "SET b x",
            "SET c y",
            "COUNT x",
            "DELETE a",
            "COUNT x",
            "SET b y",
            "COUNT x",
            "COUNT y",
            "GET a",
        ],
        &["2", "x", "1", "0", "2", "key not set"],
    )
    .await;
}

#[tokio::test]
async fn test_crlf_input() {
    let actual = run_lines(Strategy::Mutex, &["SET a 1\r", "GET a\r"]).await;
    assert_eq!(actual, ["1"]);
}

#[tokio::test]
async fn test_long_line_is_skipped() {
    let long_value = "k".repeat(5000);
    let long_set = format!("SET {long_value} v");

    test_both(
        &["SET a 1", long_set.as_str(), "GET a", "COUNT v"],
        &["1", "0"],
    )
    .await;
}

#[tokio::test]
async fn test_long_line_respects_limit() {
    let config = Config {
        max_line_length: 8,
        ..Config::default()
    };
    let input = "SET some_long_key some_long_value\nSET k v\nGET k\nGET some_long_key";
    let mut output = Vec::new();

    serve(config, input.as_bytes(), &mut output).await.unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "v\n");
}

#[tokio::test]
async fn test_non_ascii_whitespace_is_part_of_a_token() {
    test_both(&["SET a\u{a0}b c", "GET a\u{a0}b", "GET a"], &["c", "key not set"]).await;
}

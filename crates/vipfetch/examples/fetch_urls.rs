//! Example: Fetch a few URLs and show how each one is handled
//!
//! Run with: cargo run -p vipfetch --example fetch_urls
//!
//! Live pages are fetched from the network; refused URLs never are.

use vipfetch::{fetch, FetchResult};

/// Expected outcome for a case
#[derive(Clone, Copy, PartialEq)]
enum Expect {
    Content,
    Rejected,
}

/// Test case definition
struct TestCase {
    url: &'static str,
    description: &'static str,
    expect: Expect,
}

const TEST_CASES: &[TestCase] = &[
    TestCase {
        url: "https://vipleiloes.com.br/",
        description: "Main site",
        expect: Expect::Content,
    },
    TestCase {
        url: "https://www.leilaovip.com.br/",
        description: "Sister site, subdomain",
        expect: Expect::Content,
    },
    TestCase {
        url: "https://example.com/",
        description: "Unrelated domain",
        expect: Expect::Rejected,
    },
    TestCase {
        url: "https://vipleiloes.com.br.example.com/",
        description: "Allowed domain used as a label of another domain",
        expect: Expect::Rejected,
    },
];

#[tokio::main]
async fn main() {
    println!("vipfetch URL Examples");
    println!("=====================\n");

    let mut passed = 0;
    let mut failed = 0;

    for (i, case) in TEST_CASES.iter().enumerate() {
        println!("{}. {}", i + 1, case.description);
        println!("   URL: {}", case.url);

        let result = fetch(case.url).await;
        print_result_summary(&result);

        let outcome = match result {
            FetchResult::Content { .. } => Some(Expect::Content),
            FetchResult::Rejected { .. } => Some(Expect::Rejected),
            FetchResult::UpstreamError(_) => None,
        };

        if outcome == Some(case.expect) {
            println!("   ✓ PASS\n");
            passed += 1;
        } else {
            println!("   ✗ FAIL\n");
            failed += 1;
        }
    }

    println!("=====================");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn print_result_summary(result: &FetchResult) {
    match result {
        FetchResult::Content { text, truncated } => {
            let preview = text.chars().take(100).collect::<String>().replace('\n', " ");
            println!("   Characters: {}", text.chars().count());
            if *truncated {
                println!("   Truncated: yes");
            }
            println!("   Preview: {}", preview);
        }
        FetchResult::Rejected { reason } => println!("   Rejected: {}", reason),
        FetchResult::UpstreamError(err) => println!("   Upstream error: {}", err),
    }
}

// Example: Basic mock engine usage
// Run with: cargo run --example basic_usage

use mocksql::{DbmsKind, MockQueryEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== mocksql Basic Usage Example ===\n");

    let engine = MockQueryEngine::new();

    // 1. Connection test
    println!("1. Testing the connection...");
    let outcome = engine.test_connection(DbmsKind::Mysql);
    println!("{} ({:?})\n", outcome.message, outcome.version);

    // 2. Queries against the fixtures
    let queries = [
        "SELECT * FROM emp",
        "SELECT ename, job, sal FROM emp WHERE deptno = 20 ORDER BY sal DESC",
        "SELECT * FROM dept WHERE loc = 'DALLAS'",
        "UPDATE emp SET sal = sal * 1.1 WHERE deptno = 30",
        "SELECT 1 + 1",
        "SELECT * FROM bonus",
    ];

    for (i, sql) in queries.iter().enumerate() {
        println!("{}. {}", i + 2, sql);
        let result = engine.execute(sql).await;
        println!("{}\n", result.format());
    }

    // 3. The same result as the proxy would send it
    println!("JSON envelope:");
    let result = engine.execute("SELECT * FROM salgrade WHERE grade = 3").await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    println!("\n=== Example Complete ===");
    Ok(())
}

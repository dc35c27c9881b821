use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    home: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    fn db(&self) -> std::path::PathBuf {
        self.home.path().join("todo.db")
    }

    fn udo(&self) -> Command {
        let mut cmd = Command::cargo_bin("udo").unwrap();
        cmd.env("HOME", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("UDO_DB")
            .env_remove("UDO_LOG");
        cmd
    }

    fn initialized() -> Self {
        let env = Self::new();
        env.udo().arg("init").assert().success();
        env
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let out = self.udo().args(args).args(["-o", "json"]).output().unwrap();
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
        serde_json::from_slice(&out.stdout).unwrap()
    }
}

#[test]
fn init_writes_config_and_database() {
    let env = Env::new();

    env.udo()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("The to-do database is"));

    assert!(env.home.path().join(".udo").join("config.yaml").exists());
    assert!(env.home.path().join(".udo").join("udo.db").exists());
}

#[test]
fn init_honors_db_path() {
    let env = Env::new();

    env.udo()
        .args(["--db-path", env.db().to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("todo.db"));
    assert!(env.db().exists());

    // The config now points at the custom database.
    env.udo().args(["add", "water", "plants"]).assert().success();
    env.udo()
        .args(["--db-path", env.db().to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("water plants."));
}

#[test]
fn commands_fail_before_init() {
    let env = Env::new();

    env.udo()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found. Please run `udo init`"));
}

#[test]
fn missing_database_is_reported() {
    let env = Env::new();

    env.udo()
        .args(["--db-path", env.db().to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Database not found"));
}

#[test]
fn empty_list_message() {
    let env = Env::initialized();

    env.udo()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("There are no tasks in the to-do list yet"));
}

#[test]
fn add_then_list_groups_by_window() {
    let env = Env::initialized();

    env.udo()
        .args(["add", "buy", "milk", "-d", "tomorrow", "-p", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "to-do: \"buy milk.\" was added with priority: 1",
        ));

    let list = env.json(&["list"]);
    let buckets = list["buckets"].as_array().unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0]["name"], "tomorrow");
    assert_eq!(buckets[0]["items"][0]["description"], "buy milk.");
    assert_eq!(buckets[0]["items"][0]["priority"], 1);

    env.udo()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("TO-DO LIST:"))
        .stdout(predicate::str::contains("TOMORROW"))
        .stdout(predicate::str::contains("ID: 1 ===> buy milk."));
}

#[test]
fn add_rejects_unknown_due_token() {
    let env = Env::initialized();

    env.udo()
        .args(["add", "something", "-d", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in allowed options"));

    assert!(env.json(&["list"])["buckets"].as_array().unwrap().is_empty());
}

#[test]
fn parse_only_does_not_store() {
    let env = Env::initialized();

    env.udo()
        .args(["add", "dry", "run", "-d", "week", "--parse-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed to-do (not created)"))
        .stdout(predicate::str::contains("this week"));

    env.udo()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("There are no tasks in the to-do list yet"));
}

#[test]
fn complete_hides_task_unless_all() {
    let env = Env::initialized();
    env.udo().args(["add", "file", "report", "-d", "tm"]).assert().success();

    env.udo()
        .args(["complete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("to-do # 1 \"file report.\" completed!"));

    assert!(env.json(&["list"])["buckets"].as_array().unwrap().is_empty());

    let all = env.json(&["list", "--all"]);
    let item = &all["buckets"][0]["items"][0];
    assert_eq!(item["done"], true);
    assert_eq!(item["progress"], 100);
}

#[test]
fn update_changes_only_given_fields() {
    let env = Env::initialized();
    env.udo().args(["add", "paint", "fence", "-d", "tm"]).assert().success();

    env.udo()
        .args(["update", "1", "--progress", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated!"));
    env.udo()
        .args(["update-desc", "1", "paint", "the", "shed"])
        .assert()
        .success();

    let list = env.json(&["list"]);
    let item = &list["buckets"][0]["items"][0];
    assert_eq!(list["buckets"][0]["name"], "tomorrow");
    assert_eq!(item["description"], "paint the shed");
    assert_eq!(item["progress"], 40);
    assert_eq!(item["priority"], 2);
}

#[test]
fn update_unknown_id_fails() {
    let env = Env::initialized();

    env.udo()
        .args(["update", "42", "-p", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn remove_and_clear_with_force() {
    let env = Env::initialized();
    env.udo().args(["add", "first", "-d", "tm"]).assert().success();
    env.udo().args(["add", "second", "-d", "tm"]).assert().success();

    env.udo()
        .args(["remove", "1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("to-do # 1: 'first.' was removed"));

    env.udo()
        .args(["clear", "-f"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All to-dos were removed"));

    assert!(env.json(&["list"])["buckets"].as_array().unwrap().is_empty());
}

#[test]
fn remove_without_terminal_cannot_confirm() {
    let env = Env::initialized();
    env.udo().args(["add", "keep", "me"]).assert().success();

    env.udo().args(["remove", "1"]).assert().failure();

    env.udo()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("keep me."));
}

#[test]
fn due_command_resolves_tokens() {
    let env = Env::new();

    let due = env.json(&["due", "2040"]);
    assert_eq!(due["category"], "year");
    assert_eq!(due["due"], "2040-12-31T23:59:59");

    env.udo()
        .args(["due", "Friday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("weekday (Fri)"))
        .stdout(predicate::str::contains("23:59:59"));

    env.udo().args(["due", "friday!"]).assert().failure();
}

#[test]
fn completions_are_generated() {
    let env = Env::new();

    env.udo()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("udo"));
}

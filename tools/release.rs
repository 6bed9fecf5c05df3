use chrono::{Local, NaiveDate};
use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::process::Command;
use toml_edit::{DocumentMut, Item};

const MANIFEST: &str = "Cargo.toml";
const CHANGELOG: &str = "CHANGELOG.md";
const CHANGELOG_HEADER: &str = "# Changelog\n";

/// A `MAJOR.MINOR.PATCH[-pre]` version
#[derive(Debug, Clone, PartialEq, Eq)]
struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    pre: Option<String>,
}

impl Version {
    fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim().trim_start_matches('v');
        let (core, pre) = match text.split_once('-') {
            Some((core, pre)) if !pre.is_empty() => (core, Some(pre.to_string())),
            Some(_) => return Err(format!("Empty pre-release in version: {}", text)),
            None => (text, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(format!("Expected MAJOR.MINOR.PATCH, got: {}", text));
        }
        let number = |part: &str| {
            part.parse::<u64>()
                .map_err(|_| format!("Invalid version component '{}' in {}", part, text))
        };

        Ok(Self {
            major: number(parts[0])?,
            minor: number(parts[1])?,
            patch: number(parts[2])?,
            pre,
        })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                // A pre-release sorts before the release it precedes
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

/// Reads `package.version` from a manifest
fn manifest_version(doc: &DocumentMut) -> Result<Version, String> {
    let version = doc
        .get("package")
        .and_then(|package| package.get("version"))
        .and_then(Item::as_str)
        .ok_or_else(|| "Could not find package.version in Cargo.toml".to_string())?;
    Version::parse(version)
}

/// Writes `new` into `package.version`, refusing to go backwards
fn bump_manifest(doc: &mut DocumentMut, new: &Version) -> Result<Version, String> {
    let current = manifest_version(doc)?;
    if *new <= current {
        return Err(format!(
            "New version {} must be greater than current version {}",
            new, current
        ));
    }
    doc["package"]["version"] = Item::from(new.to_string());
    Ok(current)
}

/// Renders one changelog section from `git log` subject lines
fn changelog_entry(version: &Version, date: NaiveDate, commits: &str) -> String {
    let mut entry = format!("## v{} - {}\n\n", version, date.format("%Y-%m-%d"));
    let lines: Vec<&str> = commits
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        entry.push_str("- No notable changes\n");
    }
    for line in lines {
        if line.starts_with("- ") {
            entry.push_str(line);
        } else {
            entry.push_str("- ");
            entry.push_str(line);
        }
        entry.push('\n');
    }
    entry
}

/// Inserts `entry` as the newest section of an existing changelog
fn prepend_changelog(existing: &str, entry: &str) -> String {
    let body = existing
        .strip_prefix(CHANGELOG_HEADER)
        .unwrap_or(existing)
        .trim_start_matches('\n');
    if body.is_empty() {
        format!("{}\n{}", CHANGELOG_HEADER, entry)
    } else {
        format!("{}\n{}\n{}", CHANGELOG_HEADER, entry, body)
    }
}

fn get_latest_tag() -> Result<Option<String>, Box<dyn std::error::Error>> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--abbrev=0"])
        .output()?;
    if !output.status.success() {
        return Ok(None);
    }
    let tag = String::from_utf8(output.stdout)?.trim().to_string();
    Ok(if tag.is_empty() { None } else { Some(tag) })
}

fn get_commit_history(previous_tag: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let mut args = vec!["log".to_string(), "--pretty=format:- %s".to_string()];
    if let Some(tag) = previous_tag {
        args.push(format!("{}..HEAD", tag));
    }
    let output = Command::new("git").args(&args).output()?;
    Ok(String::from_utf8(output.stdout)?)
}

fn confirm(message: &str) -> Result<bool, io::Error> {
    print!("{} (y/n): ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn run(description: &str, program: &str, args: &[&str]) -> Result<(), Box<dyn std::error::Error>> {
    println!("Executing: {} {}", program, args.join(" "));
    let status = Command::new(program).args(args).status()?;
    if !status.success() {
        return Err(format!("Failed to {}", description).into());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = fs::read_to_string(MANIFEST)?.parse::<DocumentMut>()?;
    println!("Current version is: {}", manifest_version(&doc)?);

    println!("Enter new version:");
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let new_version = Version::parse(&input)?;

    if !confirm(&format!("Ready to release version {}?", new_version))? {
        println!("Release aborted.");
        return Ok(());
    }

    let previous_tag = get_latest_tag()?;
    println!("Previous tag: {}", previous_tag.as_deref().unwrap_or("None"));
    let commits = get_commit_history(previous_tag.as_deref())?;
    if commits.trim().is_empty() && !confirm("No commits since the last tag. Continue?")? {
        println!("Release aborted.");
        return Ok(());
    }

    bump_manifest(&mut doc, &new_version)?;
    fs::write(MANIFEST, doc.to_string())?;
    println!("Updated {} with new version: {}", MANIFEST, new_version);

    let entry = changelog_entry(&new_version, Local::now().date_naive(), &commits);
    let existing = fs::read_to_string(CHANGELOG).unwrap_or_default();
    fs::write(CHANGELOG, prepend_changelog(&existing, &entry))?;
    println!("Added release notes to {}:\n{}", CHANGELOG, entry);

    // Refresh Cargo.lock for the new version
    run("update Cargo.lock", "cargo", &["update", "--workspace"])?;

    let tag = format!("v{}", new_version);
    let message = format!("Bump version to {}", new_version);
    run("stage release files", "git", &["add", MANIFEST, "Cargo.lock", CHANGELOG])?;
    run("commit version bump", "git", &["commit", "-m", &message])?;
    run("create tag", "git", &["tag", "-a", &tag, "-m", &format!("Version {}", new_version)])?;

    if confirm("Push commits and tags?")? {
        run("push commits", "git", &["push"])?;
        run("push tags", "git", &["push", "--tags"])?;
    } else {
        println!("Skipping push.");
    }

    if confirm("Publish to crates.io?")? {
        run("publish to crates.io", "cargo", &["publish"])?;
    } else {
        println!("Skipping crates.io publishing.");
    }

    println!("Successfully released version {}", new_version);
    Ok(())
}

// Shared fixture: a small real repository with both merge conventions.
#![allow(dead_code)]

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

pub const REPO_URL: &str = "https://github.com/acme/widget";

/// 2023-01-01T00:00:00Z
pub const V010_TAGGED_AT: i64 = 1_672_531_200;

pub struct Fixture {
    pub repo: Repository,
    pub dir: TempDir,
    pub root: Oid,
    pub squash_1: Oid,
    pub feature: Oid,
    pub merge_2: Oid,
    pub squash_4: Oid,
    pub branch_merge: Oid,
}

fn signature(seconds: i64) -> Signature<'static> {
    Signature::new("Test Author", "author@example.com", &Time::new(seconds, 0)).unwrap()
}

fn commit(repo: &Repository, seconds: i64, message: &str, parents: &[Oid]) -> Oid {
    let tree_oid = repo.treebuilder(None).unwrap().write().unwrap();
    let tree = repo.find_tree(tree_oid).unwrap();
    let parents: Vec<git2::Commit> = parents
        .iter()
        .map(|oid| repo.find_commit(*oid).unwrap())
        .collect();
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    let sig = signature(seconds);

    repo.commit(None, &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

/// History on `main`, newest first:
///
/// ```text
/// branch_merge  Merge branch 'hotfix' into main   (not a pull request)
/// squash_4      Fix crash in lexer_core (#4)
/// merge_2       Merge pull request #2             tag v0.2.0 (lightweight)
/// feature       work on lexer                     (second parent of merge_2)
/// squash_1      Add parser (#1)                   tag v0.1.0 (annotated)
/// root          Initial commit
/// ```
///
/// `nightly` also points at `squash_4` but is not a release tag.
pub fn build() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    let root = commit(&repo, 1_000, "Initial commit (#0)\n\nroot\n", &[]);
    let squash_1 = commit(&repo, 2_000, "Add parser (#1)\n\nSquashed body\n", &[root]);
    let feature = commit(&repo, 3_000, "work on lexer\n", &[squash_1]);
    let merge_2 = commit(
        &repo,
        4_000,
        "Merge pull request #2 from dev/lexer\n\nAdd lexer\n",
        &[squash_1, feature],
    );
    let squash_4 = commit(
        &repo,
        5_000,
        "Fix crash in lexer_core (#4)\n\n* guard empty input\n",
        &[merge_2],
    );
    let branch_merge = commit(
        &repo,
        6_000,
        "Merge branch 'hotfix' into main\n",
        &[squash_4, feature],
    );

    repo.reference("refs/heads/main", branch_merge, true, "fixture")
        .unwrap();

    {
        let tagger = signature(V010_TAGGED_AT);
        let target = repo.find_object(squash_1, None).unwrap();
        repo.tag("v0.1.0", &target, &tagger, "First release", false)
            .unwrap();

        let target = repo.find_object(merge_2, None).unwrap();
        repo.tag_lightweight("v0.2.0", &target, false).unwrap();

        let target = repo.find_object(squash_4, None).unwrap();
        repo.tag_lightweight("nightly", &target, false).unwrap();
    }

    Fixture {
        repo,
        dir,
        root,
        squash_1,
        feature,
        merge_2,
        squash_4,
        branch_merge,
    }
}

pub const EXPECTED_CHANGELOG: &str = "\
# Changelog

## [v0.3.0](https://github.com/acme/widget/tree/v0.3.0) (2024-06-30)

[Full Changelog](https://github.com/acme/widget/compare/v0.2.0...v0.3.0)

**Merged pull requests:**

- Fix crash in lexer\\_core [#4](https://github.com/acme/widget/pull/4)

## [v0.2.0](https://github.com/acme/widget/tree/v0.2.0)

[Full Changelog](https://github.com/acme/widget/compare/v0.1.0...v0.2.0)

**Merged pull requests:**

- Add lexer [#2](https://github.com/acme/widget/pull/2)

## [v0.1.0](https://github.com/acme/widget/tree/v0.1.0) (2023-01-01)


**Merged pull requests:**

- Add parser [#1](https://github.com/acme/widget/pull/1)
";

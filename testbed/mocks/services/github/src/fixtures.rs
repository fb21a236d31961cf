use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sample anthology served by the default fixture.
pub const SAMPLE_ANTHOLOGY: &str = "\u{25CF}The first tale begins\nin a quiet village.\n\nIt ends at dusk.\n\n\u{25CF}The second tale\nis short.\n\n\u{25CF}The third tale is the newest.\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: String,
    pub default_branch: String,
    pub branches: Vec<String>,
    pub files: HashMap<String, FileContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContent {
    pub content: String,
}

impl FileContent {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RepositoryFixture {
    repositories: HashMap<String, Repository>,
}

impl RepositoryFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_repository(&mut self, repo: Repository) {
        let key = format!("{}/{}", repo.owner, repo.name);
        self.repositories.insert(key, repo);
    }

    pub fn get_repository(&self, owner: &str, name: &str) -> Option<&Repository> {
        let key = format!("{}/{}", owner, name);
        self.repositories.get(&key)
    }

    /// Look up a file on a branch, `None` if any part is missing.
    pub fn get_file(&self, owner: &str, name: &str, branch: &str, path: &str) -> Option<&FileContent> {
        let repo = self.get_repository(owner, name)?;
        if !repo.branches.iter().any(|b| b == branch) {
            return None;
        }
        repo.files.get(path)
    }

    pub fn from_yaml(yaml_content: &str) -> anyhow::Result<Self> {
        let repos: Vec<Repository> = serde_yaml::from_str(yaml_content)?;
        let mut fixture = Self::new();
        for repo in repos {
            fixture.add_repository(repo);
        }
        Ok(fixture)
    }

    /// `wllclngn/SomeKindofFiction` on `main` with the sample anthology at both
    /// `src/Fantasy.txt` and `Fantasy.txt`, plus empty and marker-less files.
    pub fn create_test_fixture() -> Self {
        let mut files = HashMap::new();
        files.insert("src/Fantasy.txt".to_string(), FileContent::text(SAMPLE_ANTHOLOGY));
        files.insert("Fantasy.txt".to_string(), FileContent::text(SAMPLE_ANTHOLOGY));
        files.insert("Empty.txt".to_string(), FileContent::text("  \n\n"));
        files.insert(
            "Plain.txt".to_string(),
            FileContent::text("A document\nwithout any entry markers.\n"),
        );

        let mut fixture = Self::new();
        fixture.add_repository(Repository {
            name: "SomeKindofFiction".to_string(),
            owner: "wllclngn".to_string(),
            default_branch: "main".to_string(),
            branches: vec!["main".to_string()],
            files,
        });
        fixture
    }
}

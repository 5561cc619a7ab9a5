use crate::gitlab::{
    error::GitlabError,
    item::{Item, ItemKind, ItemsQueryBuilder},
    project::Project,
    Client,
};
use crate::normalize::YearWindow;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub projects: usize,
    pub projects_with_items: usize,
    pub items: usize,
}

/// Reports every `kind` item created during `year` across all projects the
/// token can see, one block per project that has any. Projects and items keep
/// the order the API returns them in.
pub async fn items_created_in_year<W: Write>(
    client: &Client<'_>,
    kind: ItemKind,
    year: i32,
    out: &mut W,
) -> Result<Summary, GitlabError> {
    let window = YearWindow::new(year).ok_or(GitlabError::InvalidYear(year))?;
    let query = ItemsQueryBuilder::default()
        .kind(kind)
        .window(window)
        .build()?;

    writeln!(out, "Fetching list of accessible projects...")?;
    let projects = client.list_projects().await?;
    writeln!(out, "Found {} projects.", projects.len())?;

    let mut summary = Summary {
        projects: projects.len(),
        ..Summary::default()
    };

    for project in &projects {
        let items = client.list_items(project.id, &query).await;

        info!("{}: {} {kind}", project.path_with_namespace, items.len());

        if items.is_empty() {
            continue;
        }

        write_project(out, project, kind, &items)?;

        summary.projects_with_items += 1;
        summary.items += items.len();
    }

    Ok(summary)
}

fn write_project<W: Write>(
    out: &mut W,
    project: &Project,
    kind: ItemKind,
    items: &[Item],
) -> std::io::Result<()> {
    for item in items {
        writeln!(out, "[{}] {}", item.id, item.display_title())?;
    }

    writeln!(
        out,
        "\nProject: {} ({}) — {} {kind}",
        project.path_with_namespace,
        project.id,
        items.len()
    )
}

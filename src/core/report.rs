use crate::domain::model::InventoryReport;

/// Fallback shown when a repository has no description.
pub const NO_DESCRIPTION: &str = "No description provided.";

pub fn render_text(report: &InventoryReport) -> String {
    let mut output = format!(
        "GitHub Inventory Report\nTotal Repositories: {}\nPublic Repos: {}\nPrivate Repos: {}\n\n",
        report.total_count, report.public_count, report.private_count
    );

    for (index, repo) in report.entries.iter().enumerate() {
        let desc = repo.description.as_deref().unwrap_or(NO_DESCRIPTION);
        output.push_str(&format!(
            "{}. {} ({})\n  {}\n\n",
            index + 1,
            repo.name,
            repo.visibility(),
            desc
        ));
    }

    output
}

pub fn render_markdown(report: &InventoryReport) -> String {
    let mut output = format!(
        "# GitHub Inventory Report\n**Total Repositories:** {}\n**Public Repos:** {}\n**Private Repos:** {}\n\n",
        report.total_count, report.public_count, report.private_count
    );

    for (index, repo) in report.entries.iter().enumerate() {
        let desc = repo.description.as_deref().unwrap_or(NO_DESCRIPTION);
        output.push_str(&format!(
            "### {}. [{}]({}) ({})\n{}\n\n",
            index + 1,
            repo.name,
            repo.html_url,
            repo.visibility(),
            desc
        ));
    }

    output
}

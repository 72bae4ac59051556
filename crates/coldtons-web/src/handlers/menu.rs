//! Static tool menu served to the frontend sidebar.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Tool {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MenuSection {
    pub title: &'static str,
    pub tools: &'static [Tool],
}

#[derive(Debug, Serialize)]
pub struct MenuConfig {
    pub database: MenuSection,
    pub analysis: MenuSection,
    pub visualization: MenuSection,
    pub modeling: MenuSection,
    pub simulation: MenuSection,
    pub collaboration: MenuSection,
    pub help: MenuSection,
}

const fn tool(id: &'static str, name: &'static str, icon: &'static str, description: &'static str) -> Tool {
    Tool { id, name, icon, description }
}

const DATABASE_TOOLS: &[Tool] = &[
    tool("adtn-catalog", "ADTN Catalog", "fas fa-database", "Access the ADTN neutron star catalog"),
    tool("data-import", "Data Import", "fas fa-upload", "Import neutron star data from various sources"),
    tool("data-export", "Data Export", "fas fa-download", "Export processed data in various formats"),
    tool("data-browser", "Data Browser", "fas fa-table", "Browse and search through neutron star datasets"),
];

const ANALYSIS_TOOLS: &[Tool] = &[
    tool("statistical-analysis", "Statistical Analysis", "fas fa-chart-bar", "Perform statistical analysis on neutron star data"),
    tool("period-analysis", "Period Analysis", "fas fa-wave-square", "Analyze pulsar periods and timing"),
];

const VISUALIZATION_TOOLS: &[Tool] = &[
    tool("plot-generator", "Plot Generator", "fas fa-chart-line", "Create various plots and charts"),
    tool("sky-map", "Sky Map", "fas fa-globe", "Visualize neutron star positions on sky map"),
];

const MODELING_TOOLS: &[Tool] = &[
    tool("eos-modeling", "EoS Modeling", "fas fa-atom", "Model equations of state for neutron star matter"),
];

const SIMULATION_TOOLS: &[Tool] = &[
    tool("merger-simulation", "Merger Simulation", "fas fa-expand-arrows-alt", "Simulate neutron star mergers"),
];

const COLLABORATION_TOOLS: &[Tool] = &[
    tool("project-sharing", "Project Sharing", "fas fa-share", "Share projects and collaborate with others"),
];

const HELP_TOOLS: &[Tool] = &[
    tool("documentation", "Documentation", "fas fa-book", "Access comprehensive documentation"),
    tool("tutorials", "Tutorials", "fas fa-graduation-cap", "Interactive tutorials and guides"),
];

pub fn menu_config() -> MenuConfig {
    MenuConfig {
        database: MenuSection { title: "Database Tools", tools: DATABASE_TOOLS },
        analysis: MenuSection { title: "Analysis Tools", tools: ANALYSIS_TOOLS },
        visualization: MenuSection { title: "Visualization Tools", tools: VISUALIZATION_TOOLS },
        modeling: MenuSection { title: "Modeling Tools", tools: MODELING_TOOLS },
        simulation: MenuSection { title: "Simulation Tools", tools: SIMULATION_TOOLS },
        collaboration: MenuSection { title: "Collaboration Tools", tools: COLLABORATION_TOOLS },
        help: MenuSection { title: "Help & Documentation", tools: HELP_TOOLS },
    }
}

/// GET /api/menu-config
pub async fn get_menu_config() -> Json<MenuConfig> {
    Json(menu_config())
}

//! Role-based access to the pages of the depot console.
//!
//! Which pages a role may open is a fixed lookup table; there is no per-user configuration.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A user's job role
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// Runs day-to-day service from the operations centre
    OperationsSupervisor,
    /// Manages the maintenance workshop
    WorkshopManager,
    /// Manages the depot and its stabling
    DepotManager,
    /// Responsible for the engineering condition of the rolling stock
    RollingStockEngineer,
    /// Manages train livery and advertising
    BrandingManager,
    /// Administers the console
    SystemAdmin,
    /// Plans maintenance work
    MaintenanceManager,
    /// Plans cleaning work
    CleaningManager,
    /// Carries out maintenance tasks
    WorkerTechnician,
    /// Carries out cleaning tasks
    WorkerCleaning,
    /// Supervises a station platform
    PlatformSupervisor,
}

/// A page of the depot console
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Page {
    /// Fleet overview
    Dashboard,
    /// Train scanning at the platform
    Scan,
    /// Fleet roster
    Fleet,
    /// Maintenance planning
    Maintenance,
    /// Depot layout
    Depot,
    /// What-if simulation
    Simulation,
    /// Tasks assigned to workers
    WorkerTasks,
    /// Console administration
    Admin,
}

/// The pages a role may open, in menu order
pub fn pages_for(role: Role) -> &'static [Page] {
    match role {
        Role::OperationsSupervisor => &[Page::Dashboard, Page::Scan, Page::Fleet],
        Role::WorkshopManager | Role::MaintenanceManager => &[Page::Dashboard, Page::Maintenance],
        Role::DepotManager => &[Page::Dashboard, Page::Fleet, Page::Depot, Page::Simulation],
        Role::RollingStockEngineer => &[Page::Dashboard, Page::Fleet, Page::Maintenance],
        Role::BrandingManager | Role::CleaningManager => &[Page::Dashboard],
        Role::SystemAdmin => &[
            Page::Dashboard,
            Page::Fleet,
            Page::Maintenance,
            Page::Depot,
            Page::Simulation,
            Page::Admin,
        ],
        Role::WorkerTechnician | Role::WorkerCleaning => &[Page::Dashboard, Page::WorkerTasks],
        Role::PlatformSupervisor => &[Page::Dashboard, Page::Scan],
    }
}

/// Whether the given role may open the given page
pub fn can_access(role: Role, page: Page) -> bool {
    pages_for(role).contains(&page)
}

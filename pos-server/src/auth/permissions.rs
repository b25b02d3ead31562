//! Permission Definitions
//!
//! Two fixed roles. Admins hold `all`; cashiers run the floor: they read
//! the catalog and tables and manage orders and bills.

/// Read menus and categories
pub const CATALOG_READ: &str = "catalog:read";
/// Create, edit and delete menus and categories
pub const MENU_MANAGE: &str = "menu:manage";
/// Read zones and tables
pub const TABLES_READ: &str = "tables:read";
/// Create, edit and delete zones and tables
pub const TABLES_MANAGE: &str = "tables:manage";
/// Open, edit and settle orders and their items
pub const ORDERS_MANAGE: &str = "orders:manage";
/// Create and settle bills
pub const BILLS_MANAGE: &str = "bills:manage";
/// Delete a bill that was already paid
pub const BILLS_VOID: &str = "bills:void";
/// Cashier and admin accounts
pub const USERS_MANAGE: &str = "users:manage";
/// Sales dashboard
pub const REPORTS_VIEW: &str = "reports:view";

/// Every grantable permission
pub const ALL_PERMISSIONS: &[&str] = &[
    CATALOG_READ,
    MENU_MANAGE,
    TABLES_READ,
    TABLES_MANAGE,
    ORDERS_MANAGE,
    BILLS_MANAGE,
    BILLS_VOID,
    USERS_MANAGE,
    REPORTS_VIEW,
];

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

pub const DEFAULT_CASHIER_PERMISSIONS: &[&str] =
    &[CATALOG_READ, TABLES_READ, ORDERS_MANAGE, BILLS_MANAGE];

/// Permissions carried in the token of a role
pub fn for_role(role: shared::models::Role) -> Vec<String> {
    use shared::models::Role;

    let perms = match role {
        Role::Admin => DEFAULT_ADMIN_PERMISSIONS,
        Role::Cashier => DEFAULT_CASHIER_PERMISSIONS,
    };
    perms.iter().map(|s| s.to_string()).collect()
}

/// Validate if a permission string is known
pub fn is_valid_permission(permission: &str) -> bool {
    permission == "all" || ALL_PERMISSIONS.contains(&permission) || permission.ends_with(":*")
}

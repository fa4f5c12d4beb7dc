//! Operation catalog
//!
//! Declares every admin API action grouped by category. Each entry is a thin
//! adapter from positional arguments to a typed `AdminClient` call; deletes
//! and pure updates resolve to `None`.

use super::params::{ChoiceOption, Param, TextKind};
use super::registry::{Args, Category, InvokeResult, Operation};
use crate::api::{AdminClient, ProjectLimits, UserUpdate};
use std::future::Future;
use std::sync::Arc;

/// Regions accepted by bucket geofencing
pub const GEOFENCE_REGIONS: &[ChoiceOption] = &[
    ChoiceOption::new("European Union", "EU"),
    ChoiceOption::new("European Economic Area", "EEA"),
    ChoiceOption::new("United States", "US"),
    ChoiceOption::new("Germany", "DE"),
];

/// Build all categories around one shared client
pub(crate) fn categories(client: Arc<AdminClient>) -> Vec<Category> {
    vec![
        Category::new("APIKeys", api_key_operations(&client)),
        Category::new("bucket", bucket_operations(&client)),
        Category::new("project", project_operations(&client)),
        Category::new("user", user_operations(&client)),
    ]
}

/// Close an operation body over the shared client
fn bind<F, Fut>(client: &Arc<AdminClient>, body: F) -> impl Fn(Args) -> Fut + Send + Sync + 'static
where
    F: Fn(Arc<AdminClient>, Args) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = InvokeResult> + Send + 'static,
{
    let client = Arc::clone(client);
    move |args| body(Arc::clone(&client), args)
}

fn text(label: &'static str, required: bool) -> Param {
    Param::text(label, TextKind::Text, required)
}

fn number(label: &'static str) -> Param {
    Param::text(label, TextKind::Number, false)
}

fn email(label: &'static str, required: bool) -> Param {
    Param::text(label, TextKind::Email, required)
}

// =============================================================================
// API keys
// =============================================================================

fn api_key_operations(client: &Arc<AdminClient>) -> Vec<Operation> {
    vec![Operation::new(
        "delete key",
        "Delete an API key",
        vec![text("API key", true)],
        bind(client, delete_key),
    )]
}

async fn delete_key(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let api_key = args.required_text(0)?;
    client.delete_api_key(&api_key).await?;
    Ok(None)
}

// =============================================================================
// Buckets
// =============================================================================

fn bucket_operations(client: &Arc<AdminClient>) -> Vec<Operation> {
    vec![
        Operation::new(
            "get",
            "Get the information of the specified bucket",
            vec![text("Project ID", true), text("Bucket name", true)],
            bind(client, get_bucket),
        ),
        Operation::new(
            "delete geofencing",
            "Delete the geofencing configuration of the specified bucket. The bucket MUST be empty",
            vec![text("Project ID", true), text("Bucket name", true)],
            bind(client, delete_geofencing),
        ),
        Operation::new(
            "set geofencing",
            "Set the geofencing configuration of the specified bucket. The bucket MUST be empty",
            vec![
                text("Project ID", true),
                text("Bucket name", true),
                Param::choice("Region", false, true, GEOFENCE_REGIONS),
            ],
            bind(client, set_geofencing),
        ),
    ]
}

async fn get_bucket(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    let bucket = args.required_text(1)?;
    client.get_bucket(&project_id, &bucket).await
}

async fn delete_geofencing(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    let bucket = args.required_text(1)?;
    client.delete_bucket_geofence(&project_id, &bucket).await?;
    Ok(None)
}

async fn set_geofencing(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    let bucket = args.required_text(1)?;
    let region = args.text(2);
    client
        .set_bucket_geofence(&project_id, &bucket, region.as_deref())
        .await
}

// =============================================================================
// Projects
// =============================================================================

fn project_operations(client: &Arc<AdminClient>) -> Vec<Operation> {
    vec![
        Operation::new(
            "create",
            "Add a new project to a specific user",
            vec![text("Owner ID (user ID)", true), text("Project Name", true)],
            bind(client, create_project),
        ),
        Operation::new(
            "delete",
            "Delete a specific project",
            vec![text("Project ID", true)],
            bind(client, delete_project),
        ),
        Operation::new(
            "get",
            "Get the information of a specific project",
            vec![text("Project ID", true)],
            bind(client, get_project),
        ),
        Operation::new(
            "update",
            "Update the information of a specific project",
            vec![
                text("Project ID", true),
                text("Project Name", true),
                text("Description", false),
            ],
            bind(client, update_project),
        ),
        Operation::new(
            "create API key",
            "Create a new API key for a specific project",
            vec![text("Project ID", true), text("API key name", true)],
            bind(client, create_project_api_key),
        ),
        Operation::new(
            "delete API key",
            "Delete a API key of a specific project",
            vec![text("Project ID", true), text("API Key name", true)],
            bind(client, delete_project_api_key),
        ),
        Operation::new(
            "get API keys",
            "Get the API keys of a specific project",
            vec![text("Project ID", true)],
            bind(client, get_project_api_keys),
        ),
        Operation::new(
            "get project usage",
            "Get the current usage of a specific project",
            vec![text("Project ID", true)],
            bind(client, get_project_usage),
        ),
        Operation::new(
            "get project limits",
            "Get the current limits of a specific project",
            vec![text("Project ID", true)],
            bind(client, get_project_limits),
        ),
        Operation::new(
            "update project limits",
            "Update the limits of a specific project",
            vec![
                text("Project ID", true),
                number("Storage (in bytes)"),
                number("Bandwidth (in bytes)"),
                number("Rate (requests per second)"),
                number("Buckets (maximum number)"),
                number("Segments (maximum number)"),
            ],
            bind(client, update_project_limits),
        ),
    ]
}

async fn create_project(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let owner_id = args.required_text(0)?;
    let project_name = args.required_text(1)?;
    client.create_project(&owner_id, &project_name).await
}

async fn delete_project(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    client.delete_project(&project_id).await?;
    Ok(None)
}

async fn get_project(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    client.get_project(&project_id).await
}

async fn update_project(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    let project_name = args.required_text(1)?;
    let description = args.text(2);
    client
        .update_project(&project_id, &project_name, description.as_deref())
        .await?;
    Ok(None)
}

async fn create_project_api_key(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    let name = args.required_text(1)?;
    client.create_project_api_key(&project_id, &name).await
}

async fn delete_project_api_key(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    let name = args.required_text(1)?;
    client.delete_project_api_key(&project_id, &name).await?;
    Ok(None)
}

async fn get_project_api_keys(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    client.get_project_api_keys(&project_id).await
}

async fn get_project_usage(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    client.get_project_usage(&project_id).await
}

async fn get_project_limits(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    client.get_project_limits(&project_id).await
}

async fn update_project_limits(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let project_id = args.required_text(0)?;
    let limits = ProjectLimits {
        usage: args.number(1)?,
        bandwidth: args.number(2)?,
        rate: args.number(3)?,
        buckets: args.number(4)?,
        segments: args.number(5)?,
    };
    client.update_project_limits(&project_id, &limits).await?;
    Ok(None)
}

// =============================================================================
// Users
// =============================================================================

fn user_operations(client: &Arc<AdminClient>) -> Vec<Operation> {
    vec![
        Operation::new(
            "create",
            "Create a new user account",
            vec![
                email("email", true),
                text("full name", false),
                Param::text("password", TextKind::Password, true),
            ],
            bind(client, create_user),
        ),
        Operation::new(
            "delete",
            "Delete a user's account",
            vec![email("email", true)],
            bind(client, delete_user),
        ),
        Operation::new(
            "get",
            "Get the information of a user's account",
            vec![email("email", true)],
            bind(client, get_user),
        ),
        Operation::new(
            "update",
            "Update the information of a user's account.\nBlank fields will not be updated.",
            vec![
                email("current user's email", true),
                email("new email", false),
                text("full name", false),
                text("short name", false),
                text("partner ID", false),
                text("password hash", false),
            ],
            bind(client, update_user),
        ),
    ]
}

async fn create_user(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let email = args.required_text(0)?;
    let full_name = args.text(1);
    let password = args.required_text(2)?;
    client
        .create_user(&email, full_name.as_deref(), &password)
        .await
}

async fn delete_user(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let email = args.required_text(0)?;
    client.delete_user(&email).await?;
    Ok(None)
}

async fn get_user(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let email = args.required_text(0)?;
    client.get_user(&email).await
}

async fn update_user(client: Arc<AdminClient>, args: Args) -> InvokeResult {
    let current_email = args.required_text(0)?;
    let update = UserUpdate {
        email: args.text(1),
        full_name: args.text(2),
        short_name: args.text(3),
        partner_id: args.text(4),
        password_hash: args.text(5),
    };
    client.update_user(&current_email, &update).await?;
    Ok(None)
}

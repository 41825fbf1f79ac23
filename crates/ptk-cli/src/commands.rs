//! Subcommand handlers: each builds a workflow in the right mode and drives
//! it the way the site pages do — search, select, then act.

use anyhow::{bail, Context};
use clap::Args;
use rust_decimal::Decimal;

use ptk_api::{BusinessClient, BusinessQuery, ClientConfig, IncentiveClient};
use ptk_core::{
    default_categories, load_categories, AppConfig, CategoriesFile, DiscountType, IncentiveType,
    Session,
};
use ptk_workflow::{
    BusinessForm, IncentiveDraft, SelectionWorkflow, WorkflowConfig, WorkflowMode, WorkflowState,
};

use crate::host::ConsoleHost;

/// Search terms plus an optional explicit pick from the results.
#[derive(Debug, Args)]
pub struct SelectArgs {
    /// Business name to search for
    #[arg(long)]
    pub name: Option<String>,

    /// Street address to search for
    #[arg(long)]
    pub address: Option<String>,

    /// Business id to select from the results; required when the search
    /// matches more than one row
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Debug, Args)]
pub struct IncentiveArgs {
    /// Whether the incentive is currently offered (an explicit choice)
    #[arg(long)]
    pub available: Option<bool>,

    /// Incentive type code: VT, AD, FR, SP, or OT
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Who qualifies, when the type is OT
    #[arg(long)]
    pub other_description: Option<String>,

    /// Discount amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// "percentage" or "fixed-amount"
    #[arg(long)]
    pub discount_type: Option<String>,

    /// How to claim the incentive
    #[arg(long)]
    pub information: Option<String>,
}

#[derive(Debug, Args)]
pub struct BusinessArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub address1: String,
    #[arg(long)]
    pub address2: Option<String>,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub zip: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long = "type")]
    pub business_type: String,
    #[arg(long, default_value = "active")]
    pub status: String,
}

fn categories(config: &AppConfig) -> anyhow::Result<CategoriesFile> {
    match &config.categories_path {
        Some(path) => load_categories(path)
            .with_context(|| format!("loading categories from {}", path.display())),
        None => Ok(default_categories()),
    }
}

fn build_workflow(
    config: &AppConfig,
    mode: WorkflowMode,
) -> anyhow::Result<SelectionWorkflow<ConsoleHost>> {
    let client_config = ClientConfig::from_app_config(config);
    let session = Session {
        role: config.session_role,
        user_id: config.session_user_id.clone(),
    };
    let host = ConsoleHost::new(categories(config)?);

    Ok(SelectionWorkflow::new(
        WorkflowConfig {
            mode,
            chain_parent_select: config.chain_parent_select,
        },
        session,
        BusinessClient::new(&client_config).context("building business client")?,
        IncentiveClient::new(&client_config).context("building incentive client")?,
        host,
    ))
}

fn query(select: &SelectArgs) -> BusinessQuery {
    BusinessQuery {
        name: select.name.clone(),
        address: select.address.clone(),
    }
}

fn print_results(workflow: &SelectionWorkflow<ConsoleHost>, config: &AppConfig) {
    let WorkflowState::ResultsShown { results } = workflow.state() else {
        return;
    };
    let labels = categories(config).unwrap_or_else(|_| default_categories());
    for business in results {
        let marker = if business.is_chain_parent { " (chain)" } else { "" };
        println!(
            "{}  {}{marker}  [{}]  {}",
            business.id,
            business.name,
            labels.label_for(&business.business_type),
            business.display_address()
        );
    }
}

/// Runs the search and selects the requested (or only) result.
async fn search_and_select(
    workflow: &mut SelectionWorkflow<ConsoleHost>,
    select: &SelectArgs,
) -> anyhow::Result<()> {
    workflow.submit_search(&query(select)).await?;

    let WorkflowState::ResultsShown { results } = workflow.state() else {
        bail!("search did not produce a result list");
    };

    let target = match (&select.id, results.len()) {
        (Some(id), _) => id.clone(),
        (None, 1) => results[0].id.clone(),
        (None, 0) => bail!("no businesses matched; broaden the search"),
        (None, n) => {
            bail!("{n} businesses matched; re-run with --id to pick one")
        }
    };

    workflow.select_result(&target).await?;
    Ok(())
}

pub async fn search(config: &AppConfig, select: &SelectArgs) -> anyhow::Result<()> {
    let mut workflow = build_workflow(config, WorkflowMode::View)?;
    workflow.submit_search(&query(select)).await?;
    print_results(&workflow, config);
    Ok(())
}

pub async fn show(config: &AppConfig, select: &SelectArgs) -> anyhow::Result<()> {
    let mut workflow = build_workflow(config, WorkflowMode::View)?;
    search_and_select(&mut workflow, select).await
}

pub async fn add_incentive(
    config: &AppConfig,
    select: &SelectArgs,
    incentive: &IncentiveArgs,
) -> anyhow::Result<()> {
    let mut workflow = build_workflow(config, WorkflowMode::Add)?;
    search_and_select(&mut workflow, select).await?;
    workflow.submit_incentive(&draft(incentive)?).await?;
    Ok(())
}

pub async fn update_incentive(
    config: &AppConfig,
    select: &SelectArgs,
    incentive_id: &str,
    incentive: &IncentiveArgs,
) -> anyhow::Result<()> {
    let mut workflow = build_workflow(config, WorkflowMode::Update)?;
    search_and_select(&mut workflow, select).await?;
    workflow.select_incentive_for_edit(incentive_id)?;
    workflow.submit_incentive(&draft(incentive)?).await?;
    Ok(())
}

pub async fn update_business(
    config: &AppConfig,
    select: &SelectArgs,
    business: &BusinessArgs,
) -> anyhow::Result<()> {
    let mut workflow = build_workflow(config, WorkflowMode::Update)?;
    search_and_select(&mut workflow, select).await?;

    let form = BusinessForm {
        name: business.name.clone(),
        address1: business.address1.clone(),
        address2: business.address2.clone(),
        city: business.city.clone(),
        state: business.state.clone(),
        zip: business.zip.clone(),
        phone: business.phone.clone(),
        business_type: business.business_type.clone(),
        status: business.status.clone(),
    };
    workflow.submit_business_update(&form).await?;
    Ok(())
}

fn draft(args: &IncentiveArgs) -> anyhow::Result<IncentiveDraft> {
    let kind = match args.kind.as_deref() {
        None => None,
        Some(code) => Some(
            IncentiveType::parse(code)
                .with_context(|| format!("unknown incentive type code '{code}'"))?,
        ),
    };
    let discount_type = match args.discount_type.as_deref() {
        None => None,
        Some(value) => Some(
            DiscountType::parse(value)
                .with_context(|| format!("unknown discount type '{value}'"))?,
        ),
    };

    Ok(IncentiveDraft {
        business_id: None, // the workflow fills it from the selection
        is_available: args.available,
        kind,
        other_description: args.other_description.clone(),
        amount: args.amount,
        discount_type,
        information: args.information.clone(),
    })
}

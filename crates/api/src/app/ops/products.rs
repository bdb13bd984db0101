use std::sync::Arc;

use serde::Deserialize;

use invoicer_core::RecordId;
use invoicer_products::{ProductFilter, ProductPatch};

use crate::app::registry::{OperationKind, Registry, parse_input, to_output};
use crate::app::services::ProductService;
use crate::context::Permission;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ListInput {
    #[serde(rename = "where")]
    filter: Option<ProductFilter>,
    skip: Option<usize>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct IdInput {
    id: RecordId,
}

#[derive(Debug, Deserialize)]
struct CreateInput {
    data: ProductPatch,
}

#[derive(Debug, Deserialize)]
struct UpdateInput {
    id: RecordId,
    data: ProductPatch,
}

pub fn register(registry: &mut Registry, service: Arc<ProductService>) {
    let svc = service.clone();
    registry.register(
        "products.list",
        OperationKind::Query,
        Permission::new("products.read"),
        move |input| {
            let input: ListInput = parse_input(input)?;
            let products = svc.list(input.filter, input.skip, input.limit)?;
            to_output(&products)
        },
    );

    let svc = service.clone();
    registry.register(
        "products.get",
        OperationKind::Query,
        Permission::new("products.read"),
        move |input| {
            let input: IdInput = parse_input(input)?;
            to_output(&svc.get(input.id)?)
        },
    );

    let svc = service.clone();
    registry.register(
        "products.create",
        OperationKind::Mutation,
        Permission::new("products.write"),
        move |input| {
            let input: CreateInput = parse_input(input)?;
            to_output(&svc.create(input.data)?)
        },
    );

    let svc = service.clone();
    registry.register(
        "products.update",
        OperationKind::Mutation,
        Permission::new("products.write"),
        move |input| {
            let input: UpdateInput = parse_input(input)?;
            to_output(&svc.update(input.id, input.data)?)
        },
    );

    let svc = service;
    registry.register(
        "products.delete",
        OperationKind::Mutation,
        Permission::new("products.write"),
        move |input| {
            let input: IdInput = parse_input(input)?;
            to_output(&svc.delete(input.id)?)
        },
    );
}

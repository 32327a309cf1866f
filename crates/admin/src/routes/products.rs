//! Product management route handlers.
//!
//! The index page lists products with category and name filters; the form
//! page handles both create and edit. Validation failures re-render the form
//! with the submitted values and Spanish error messages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, http::StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use comanda_core::{CategoryId, ImageTransform, ProductId};

use crate::db::{
    CategoryRepository, ProductRepository, categories::CategoryRow,
    products::{ProductInput, ProductRow},
};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Product table filter query parameters.
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// One row of the product table.
#[derive(Clone)]
pub struct ProductRowView {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub category_name: String,
    pub badge_bg: String,
    pub badge_text: String,
    pub image_url: Option<String>,
    pub in_stock: bool,
}

impl From<&ProductRow> for ProductRowView {
    fn from(row: &ProductRow) -> Self {
        Self {
            id: row.id.as_i32(),
            name: row.name.clone(),
            price: row.price,
            category_name: row.category_name.clone(),
            badge_bg: row.badge_bg.clone(),
            badge_text: row.badge_text.clone(),
            image_url: row.image_url.clone(),
            in_stock: row.in_stock,
        }
    }
}

/// Category option for filter pills and the form select.
#[derive(Clone)]
pub struct CategoryOptionView {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub product_count: i64,
}

impl From<&CategoryRow> for CategoryOptionView {
    fn from(row: &CategoryRow) -> Self {
        Self {
            id: row.id.as_i32(),
            name: row.name.clone(),
            slug: row.slug.clone(),
            product_count: row.product_count,
        }
    }
}

/// Product table page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductRowView>,
    pub categories: Vec<CategoryOptionView>,
    pub active_category: String,
    pub search: String,
}

/// Product create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub heading: String,
    pub action: String,
    pub categories: Vec<CategoryOptionView>,
    pub form: ProductFormValues,
    pub errors: Vec<String>,
}

/// Raw form field values, kept as strings so a rejected submission can be
/// re-rendered exactly as the user typed it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFormValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub image_data: String,
    #[serde(default)]
    pub in_stock: Option<String>,
}

impl ProductFormValues {
    fn from_row(row: &ProductRow) -> Self {
        Self {
            name: row.name.clone(),
            description: row.description.clone(),
            price: row.price.to_string(),
            category_id: row.category_id.as_i32().to_string(),
            image_url: row.image_url.clone().unwrap_or_default(),
            image_data: row
                .image_data
                .as_ref()
                .and_then(|data| serde_json::to_string(&data.0).ok())
                .unwrap_or_default(),
            in_stock: row.in_stock.then(|| "on".to_owned()),
        }
    }

    /// Validate the submitted fields into a [`ProductInput`].
    ///
    /// Collects every problem rather than stopping at the first, so the form
    /// can show all messages at once.
    fn validate(&self) -> std::result::Result<ProductInput, Vec<String>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("El nombre del producto es requerido".to_owned());
        }

        let price = match self.price.trim().parse::<Decimal>() {
            Ok(price) if price.is_sign_negative() => {
                errors.push("El precio no puede ser negativo".to_owned());
                None
            }
            Ok(price) => Some(price),
            Err(_) => {
                errors.push("El precio es requerido y debe ser un número válido".to_owned());
                None
            }
        };

        let category_id = match self.category_id.trim().parse::<i32>() {
            Ok(id) if id > 0 => Some(CategoryId::new(id)),
            _ => {
                errors.push("La categoría es requerida".to_owned());
                None
            }
        };

        let image_data = if self.image_data.trim().is_empty() {
            None
        } else {
            match serde_json::from_str::<ImageTransform>(&self.image_data) {
                Ok(transform) if transform.validate().is_ok() => Some(transform),
                _ => {
                    errors.push("Los datos de imagen no son válidos".to_owned());
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        // Both unwraps are guarded by the error check above.
        let (Some(price), Some(category_id)) = (price, category_id) else {
            return Err(errors);
        };

        Ok(ProductInput {
            name: name.to_owned(),
            description: self.description.trim().to_owned(),
            price,
            category_id,
            image_url: Some(self.image_url.trim().to_owned()).filter(|url| !url.is_empty()),
            image_data,
            in_stock: self.in_stock.is_some(),
        })
    }
}

/// Display the product table.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<ProductsIndexTemplate> {
    let search = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let products = ProductRepository::new(state.pool())
        .list(query.category.as_deref(), search)
        .await?;
    let categories = CategoryRepository::new(state.pool())
        .list_with_counts()
        .await?;

    Ok(ProductsIndexTemplate {
        products: products.iter().map(ProductRowView::from).collect(),
        categories: categories.iter().map(CategoryOptionView::from).collect(),
        active_category: query.category.unwrap_or_default(),
        search: search.unwrap_or_default().to_owned(),
    })
}

/// Display a blank product form.
#[instrument(skip(state))]
pub async fn new_form(State(state): State<AppState>) -> Result<ProductFormTemplate> {
    let categories = CategoryRepository::new(state.pool())
        .list_with_counts()
        .await?;

    Ok(ProductFormTemplate {
        heading: "Nuevo producto".to_owned(),
        action: "/products".to_owned(),
        categories: categories.iter().map(CategoryOptionView::from).collect(),
        form: ProductFormValues::default(),
        errors: Vec::new(),
    })
}

/// Create a product from the submitted form.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ProductFormValues>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            return invalid_form(&state, "Nuevo producto", "/products", form, errors).await;
        }
    };

    let product = ProductRepository::new(state.pool()).create(&input).await?;
    tracing::info!(product_id = product.id.as_i32(), "Product created");

    Ok(Redirect::to("/").into_response())
}

/// Display the edit form for one product.
#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ProductFormTemplate> {
    let id = ProductId::new(id);
    let product = ProductRepository::new(state.pool()).get(id).await?;
    let categories = CategoryRepository::new(state.pool())
        .list_with_counts()
        .await?;

    Ok(ProductFormTemplate {
        heading: format!("Editar: {}", product.name),
        action: format!("/products/{id}"),
        categories: categories.iter().map(CategoryOptionView::from).collect(),
        form: ProductFormValues::from_row(&product),
        errors: Vec::new(),
    })
}

/// Update a product from the submitted form.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ProductFormValues>,
) -> Result<Response> {
    let id = ProductId::new(id);

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            let heading = format!("Editar producto #{id}");
            let action = format!("/products/{id}");
            return invalid_form(&state, &heading, &action, form, errors).await;
        }
    };

    let product = ProductRepository::new(state.pool()).update(id, &input).await?;
    tracing::info!(product_id = product.id.as_i32(), "Product updated");

    Ok(Redirect::to("/").into_response())
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Redirect> {
    let id = ProductId::new(id);
    ProductRepository::new(state.pool()).delete(id).await?;
    tracing::info!(product_id = id.as_i32(), "Product deleted");

    Ok(Redirect::to("/"))
}

/// Re-render the form with the submitted values and validation messages.
async fn invalid_form(
    state: &AppState,
    heading: &str,
    action: &str,
    form: ProductFormValues,
    errors: Vec<String>,
) -> Result<Response> {
    let categories = CategoryRepository::new(state.pool())
        .list_with_counts()
        .await?;

    let template = ProductFormTemplate {
        heading: heading.to_owned(),
        action: action.to_owned(),
        categories: categories.iter().map(CategoryOptionView::from).collect(),
        form,
        errors,
    };

    Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
}

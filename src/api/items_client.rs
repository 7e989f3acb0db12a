use reqwest::{
    blocking::{Client, Request, Response},
    header::CONTENT_TYPE,
    Method,
};

use crate::{
    api::dtos::item::{CreateItemDTO, PatchStatusDTO},
    errors::ItemError,
    models::item_model::{Item, ItemId, ItemStatus},
    utils::make_api_url,
};

/// Remote collaborator owning the items
pub trait ItemsApi {
    /// Full current collection for `user_id`
    fn list_items(&self, user_id: &str) -> Result<Vec<Item>, ItemError>;

    fn create_item(&self, item: &CreateItemDTO) -> Result<(), ItemError>;

    /// Sets the item's status to done
    fn mark_done(&self, id: &ItemId) -> Result<(), ItemError>;
}

pub struct HttpItemsApi {
    client: Client,
    base_url: String,
}

impl HttpItemsApi {
    pub fn new<T: Into<String>>(base_url: T) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn make_request(
        &self,
        method: Method,
        resource: &str,
        data: Option<serde_json::Value>,
    ) -> Result<Request, ItemError> {
        let url = make_api_url(&self.base_url, resource);

        let mut request = self.client.request(method, url);

        if let Some(body) = data {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .json::<serde_json::Value>(&body);
        }

        request.build().map_err(|e| e.into())
    }

    pub fn list_request(&self, user_id: &str) -> Result<Request, ItemError> {
        let mut request = self.make_request(Method::GET, "items", None)?;

        request
            .url_mut()
            .query_pairs_mut()
            .append_pair("userId", user_id);

        Ok(request)
    }

    pub fn create_request(&self, item: &CreateItemDTO) -> Result<Request, ItemError> {
        let body = serde_json::to_value(item)?;

        self.make_request(Method::POST, "items", Some(body))
    }

    pub fn mark_done_request(&self, id: &ItemId) -> Result<Request, ItemError> {
        let body = serde_json::to_value(PatchStatusDTO {
            status: ItemStatus::Done,
        })?;

        self.make_request(Method::PATCH, format!("items/{}", id).as_str(), Some(body))
    }
}

/// Handle http request response
fn handle_response(response: Response) -> Result<String, ItemError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.text()?);
    }

    match status {
        reqwest::StatusCode::NOT_FOUND => Err(ItemError::NotFound(response.url().path().to_string())),
        _ => {
            log::debug!("{:?}", response);
            Err(ItemError::Status(status.as_u16()))
        }
    }
}

impl ItemsApi for HttpItemsApi {
    fn list_items(&self, user_id: &str) -> Result<Vec<Item>, ItemError> {
        let request = self.list_request(user_id)?;

        log::debug!("GET {}", request.url());

        let body = handle_response(self.client.execute(request)?)?;

        let items: Vec<Item> = serde_json::from_str(body.as_str())?;

        log::info!("Loaded {} items for user {}", items.len(), user_id);

        Ok(items)
    }

    fn create_item(&self, item: &CreateItemDTO) -> Result<(), ItemError> {
        let request = self.create_request(item)?;

        let _ = handle_response(self.client.execute(request)?)?;

        log::info!("Created item {:?} for user {}", item.title, item.user_id);

        Ok(())
    }

    fn mark_done(&self, id: &ItemId) -> Result<(), ItemError> {
        let request = self.mark_done_request(id)?;

        let _ = handle_response(self.client.execute(request)?)?;

        log::info!("Marked item {} done", id);

        Ok(())
    }
}

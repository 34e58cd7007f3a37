//! goose adapter
//!
//! TaskDefinition 1 つを goose の `Transaction` 1 つに対応付ける。
//! RequestSpec → goose request の変換もここで行う。
//! レスポンスの中身は見ない（成否の集計は goose に任せる）。

use std::sync::Arc;
use std::time::Duration;

use drove_core::domain::{HttpMethod, RequestSpec};
use drove_core::task::{TaskDefinition, TaskRegistry};
use goose::prelude::*;

pub fn goose_method(method: HttpMethod) -> GooseMethod {
    match method {
        HttpMethod::Get => GooseMethod::Get,
        HttpMethod::Post => GooseMethod::Post,
    }
}

/// 送信するヘッダー。cookie は 1 本の `cookie` ヘッダーにまとめる
pub fn wire_headers(spec: &RequestSpec) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = spec
        .headers
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if let Some(cookie) = spec.cookie_header() {
        headers.push(("cookie".to_string(), cookie));
    }
    headers
}

/// goose に渡す直前のリクエスト
pub struct PreparedRequest<'a> {
    pub method: GooseMethod,
    pub path: &'a str,
    /// goose が集計に使う名前
    pub name: &'a str,
    pub builder: reqwest::RequestBuilder,
}

impl<'a> PreparedRequest<'a> {
    pub fn into_goose_request(self) -> GooseRequest<'a> {
        GooseRequest::builder()
            .method(self.method)
            .path(self.path)
            .name(self.name)
            .set_request_builder(self.builder)
            .build()
    }
}

pub fn prepare<'a>(
    user: &GooseUser,
    spec: &'a RequestSpec,
) -> Result<PreparedRequest<'a>, Box<TransactionError>> {
    let method = goose_method(spec.method);
    // 絶対 URL を渡すと goose はそのまま使う
    let mut builder = user.get_request_builder(&method, spec.url.as_str())?;
    for (name, value) in wire_headers(spec) {
        builder = builder.header(name, value);
    }
    if let Some(body) = &spec.body {
        builder = builder.json(body);
    }
    Ok(PreparedRequest {
        method,
        path: spec.path.as_str(),
        name: spec.name.as_str(),
        builder,
    })
}

async fn send(user: &mut GooseUser, spec: RequestSpec) -> TransactionResult {
    let request = prepare(user, &spec)?.into_goose_request();
    let _goose = user.request(request).await?;

    Ok(())
}

pub fn transaction(task: Arc<dyn TaskDefinition>) -> Result<Transaction, GooseError> {
    let name = task.name().to_string();
    let weight = task.weight() as usize;

    let closure: TransactionFunction = Arc::new(move |user| {
        // 乱数は呼び出しごとに取り、await をまたいで保持しない
        let spec = task.build(&mut rand::thread_rng());
        Box::pin(async move { send(user, spec).await })
    });

    Transaction::new(closure).set_name(&name).set_weight(weight)
}

/// registry の Task を 1 つの scenario にまとめる。weight 0 の Task は登録しない
pub fn scenario(
    name: &str,
    registry: &TaskRegistry,
    wait_time: Option<(Duration, Duration)>,
) -> Result<Scenario, GooseError> {
    let mut scenario = scenario!(name);
    if let Some((min, max)) = wait_time {
        scenario = scenario.set_wait_time(min, max)?;
    }
    for task in registry.iter().filter(|t| t.weight() > 0) {
        scenario = scenario.register_transaction(transaction(Arc::clone(task))?);
    }
    Ok(scenario)
}

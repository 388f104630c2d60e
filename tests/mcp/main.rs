use std::collections::HashMap;
use std::net::SocketAddr;

use neis_mcp::config::{Config, ENV_API_KEY, ENV_API_URL, ENV_OFFICE_CODE, ENV_SCHOOL_CODE};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;


/// Canned-response HTTP stub standing in for the NEIS endpoint.
///
/// Answers every connection with the same status and body until dropped.
/// Good enough for a client that sends one small GET per connection.
pub struct StubNeis {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl StubNeis {
    pub async fn serve(status: u16, body: Value) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let body = body.clone();
                tokio::spawn(async move {
                    // Drain the request head before answering.
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    loop {
                        match stream.read(&mut buf).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => {
                                request.extend_from_slice(&buf[..n]);
                                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                                    break;
                                }
                            }
                        }
                    }

                    let reason = match status {
                        200 => "OK",
                        500 => "Internal Server Error",
                        _ => "Status",
                    };
                    let response = format!(
                        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        reason,
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { addr, handle }
    }

    /// Base URL pointing at the stub.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for StubNeis {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Config wired to `api_url`, with fixed key and default codes.
pub fn test_config(api_url: &str) -> Config {
    let vars = HashMap::from([
        (ENV_API_KEY, "test-key".to_string()),
        (ENV_API_URL, api_url.to_string()),
        (ENV_OFFICE_CODE, "B10".to_string()),
        (ENV_SCHOOL_CODE, "7010084".to_string()),
    ]);
    Config::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

// ============================================================================
// Canned NEIS bodies
// ============================================================================

pub fn head_blocks(code: &str, message: &str) -> Value {
    json!({ "head": [
        { "list_total_count": 1 },
        { "RESULT": { "CODE": code, "MESSAGE": message } }
    ]})
}

pub fn meal_row() -> Value {
    json!({
        "ATPT_OFCDC_SC_CODE": "B10",
        "ATPT_OFCDC_SC_NM": "서울특별시교육청",
        "SD_SCHUL_CODE": "7010084",
        "SCHUL_NM": "서울과학고등학교",
        "MMEAL_SC_CODE": "2",
        "MMEAL_SC_NM": "중식",
        "MLSV_YMD": "20240315",
        "MLSV_FGR": "120",
        "DDISH_NM": "쌀밥<br/>미역국",
        "ORPLC_INFO": "쌀 : 국내산",
        "CAL_INFO": "721.4 Kcal",
        "NTR_INFO": "탄수화물(g) : 102.1",
        "MLSV_FROM_YMD": "20240315",
        "MLSV_TO_YMD": "20240315",
        "LOAD_DTM": "20240314"
    })
}

pub fn meal_success_body() -> Value {
    json!({
        "mealServiceDietInfo": [
            head_blocks("INFO-000", "정상 처리되었습니다."),
            { "row": [meal_row()] }
        ]
    })
}

pub fn meal_error_body(code: &str, message: &str) -> Value {
    json!({ "mealServiceDietInfo": [head_blocks(code, message)] })
}

pub fn school_row() -> Value {
    json!({
        "ATPT_OFCDC_SC_CODE": "B10",
        "ATPT_OFCDC_SC_NM": "서울특별시교육청",
        "SD_SCHUL_CODE": "7010084",
        "SCHUL_NM": "서울과학고등학교",
        "ENG_SCHUL_NM": "Seoul Science High School",
        "SCHUL_KND_SC_NM": "고등학교",
        "LCTN_SC_NM": "서울특별시",
        "JU_ORG_NM": "서울특별시교육청",
        "FOND_SC_NM": "공립",
        "ORG_RDNZC": "03066",
        "ORG_RDNMA": "서울특별시 종로구 혜화로 63",
        "ORG_RDNDA": "(혜화동)",
        "ORG_TELNO": "02-740-6282",
        "HMPG_ADRES": "http://sshs.sen.hs.kr",
        "COEDU_SC_NM": "남여공학",
        "ORG_FAXNO": "02-743-0471",
        "HS_SC_NM": "특목고",
        "INDST_SPECL_CCCCL_EXST_YN": "N",
        "HS_GNRL_BUSNS_SC_NM": "일반계",
        "SPCLY_PURPS_HS_ORD_NM": "과학계열",
        "ENE_BFE_SEHF_SC_NM": "전기",
        "DGHT_SC_NM": "주간",
        "FOND_YMD": "19890301",
        "FOAS_MEMRD": "19890301",
        "LOAD_DTM": "20240301"
    })
}

pub fn school_success_body() -> Value {
    json!({
        "schoolInfo": [
            head_blocks("INFO-000", "정상 처리되었습니다."),
            { "row": [school_row()] }
        ]
    })
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Extract the JSON payload from a successful `CallToolResult`.
///
/// Panics if the result is error-flagged or the text is not JSON.
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let text = result.content[0]
        .as_text()
        .expect("Tool result content should be text");
    serde_json::from_str(&text.text).expect("Tool result should be valid JSON")
}

/// Extract the error text from an error-flagged `CallToolResult`.
pub fn extract_tool_error_text(result: &rmcp::model::CallToolResult) -> String {
    assert_eq!(
        result.is_error,
        Some(true),
        "Tool call should be error-flagged: {:?}",
        result
    );

    result.content[0]
        .as_text()
        .expect("Tool error content should be text")
        .text
        .clone()
}

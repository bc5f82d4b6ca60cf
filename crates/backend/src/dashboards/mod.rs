pub mod d400_kpi_summary;
pub mod d401_monthly_series;
pub mod d402_sku_dispatch;
pub mod d403_order_completion;
pub mod d404_drilldown;
pub mod report;

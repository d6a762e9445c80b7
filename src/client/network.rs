use message_io::events::EventReceiver;
use message_io::network::{Endpoint, SendStatus, Transport};
use message_io::node::{self, NodeHandler, NodeTask, StoredNetEvent, StoredNodeEvent};
use kickabout::network::client::Packet;
use kickabout::network::codec::WireFormat;
use kickabout::network::server::Packet as ServerPacket;
use kickabout::session::Outbox;
use kickabout::settings::{Settings, TransportKind};
use thiserror::Error;

pub struct Network {
    pub handler: NodeHandler<()>,
    pub receiver: EventReceiver<StoredNodeEvent<()>>,
    pub endpoint: Endpoint,
    format: WireFormat,
    status: ConnectionStatus,

    #[allow(dead_code)] // RAII
    task: NodeTask,
}

#[derive(Clone, Debug, Error)]
pub enum NetworkError {
    #[error("could not connect to {0}")]
    Connect(String),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    /// Connecting failed or the server went away. Nothing reconnects.
    Closed,
}

pub enum NetworkEvent {
    Connected,
    ConnectFailed,
    Packet(ServerPacket),
    Disconnected,
}

impl Network {
    pub fn connect(settings: &Settings) -> Result<Self, NetworkError> {
        let (handler, listener) = node::split::<()>();

        let transport = match settings.transport {
            TransportKind::Ws => Transport::Ws,
            TransportKind::Tcp => Transport::FramedTcp,
        };

        let (server, server_addr) = handler
            .network()
            .connect(transport, settings.address.as_str())
            .map_err(|_| NetworkError::Connect(settings.address.clone()))?;
        log::info!("Connecting to {} ({:?})", server_addr, settings.transport);

        let (task, receiver) = listener.enqueue();

        Ok(Self {
            handler,
            task,
            receiver,
            endpoint: server,
            format: settings.wire_format,
            status: ConnectionStatus::Connecting,
        })
    }

    pub fn stop(&self) {
        self.handler.stop();
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    /// Next network event, skipping anything that isn't a well-formed server packet.
    pub fn try_receive(&mut self) -> Option<NetworkEvent> {
        while let Some(event) = self.receiver.try_receive() {
            match event.network() {
                StoredNetEvent::Connected(_, true) => {
                    log::info!("Connected to server");
                    self.status = ConnectionStatus::Connected;
                    return Some(NetworkEvent::Connected);
                }
                StoredNetEvent::Connected(_, false) => {
                    log::error!("Could not connect to server");
                    self.status = ConnectionStatus::Closed;
                    return Some(NetworkEvent::ConnectFailed);
                }
                StoredNetEvent::Accepted(endpoint, _) => {
                    log::warn!("Unexpected incoming connection from {}", endpoint.addr());
                }
                StoredNetEvent::Message(_, bytes) => match self.format.decode(&bytes) {
                    Ok(packet) => return Some(NetworkEvent::Packet(packet)),
                    Err(e) => log::error!("Error parsing packet {:?}", e),
                },
                StoredNetEvent::Disconnected(_) => {
                    log::warn!("Disconnected from server");
                    self.status = ConnectionStatus::Closed;
                    return Some(NetworkEvent::Disconnected);
                }
            }
        }

        None
    }
}

impl Outbox for Network {
    fn is_open(&self) -> bool {
        self.is_connected()
    }

    fn send(&mut self, packet: &Packet) {
        let bytes = match self.format.encode(packet) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Couldn't encode {packet:?}: {e}");
                return;
            }
        };

        let status = self.handler.network().send(self.endpoint, &bytes);
        if status != SendStatus::Sent {
            log::warn!("Dropped {packet:?}: {status:?}");
        }
    }
}
